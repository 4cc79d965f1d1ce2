//! Stroke rasterization onto a session-owned pixel surface.
//!
//! [`MaskPainter`] owns the editing surface for one session: the source
//! image at its native resolution with the user's freehand strokes
//! rasterized on top in the reserved marker color. Pointer coordinates
//! arriving in display space are translated to image-pixel space using
//! the native/display size ratio, so drawing stays accurate however the
//! surface is scaled on screen.
//!
//! Strokes are rendered segment-by-segment with round caps and joins at
//! the configured brush width. Anti-aliasing is deliberately disabled:
//! every painted pixel is the exact marker color at full opacity, which
//! makes the downstream mask extraction binary by construction instead
//! of by thresholding fractional edge coverage.
//!
//! All drawing is synchronous and applied in arrival order; the surface
//! has a single writer for its whole lifetime.

use image::{Rgba, RgbaImage};
use tiny_skia::{
    ColorU8, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as StrokeStyle, Transform,
};

use crate::types::{
    DEFAULT_BRUSH_WIDTH, Dimensions, EditorError, MARKER_COLOR, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH,
    Point, Stroke,
};

/// Session-scoped painting surface.
///
/// Created from a decoded source image, mutated in place by stroke
/// events, and finally exported as a straight-alpha [`RgbaImage`] for
/// mask extraction. Discarding the painter discards the session; no
/// cleanup beyond dropping the buffers is required.
pub struct MaskPainter {
    /// Source image plus rasterized strokes (premultiplied RGBA).
    surface: Pixmap,
    /// Pristine copy of the decoded source, for [`clear`](Self::clear).
    pristine: Pixmap,
    /// Brush width in pixels for subsequent strokes.
    brush_width: u32,
    /// Rendered display size, when it differs from the native size.
    display_size: Option<(f64, f64)>,
    /// Points of the in-progress stroke (image space), if any.
    active: Option<Vec<Point>>,
}

impl MaskPainter {
    /// Decode source bytes and build a painting surface at the image's
    /// native resolution.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptyInput`] for empty bytes,
    /// [`EditorError::ImageDecode`] for undecodable data, and
    /// [`EditorError::EmptySurface`] for zero-area images.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EditorError> {
        let image = crate::decode::decode_rgba(bytes)?;
        Self::from_image(&image)
    }

    /// Build a painting surface from an already-decoded image.
    ///
    /// Pixels are copied 1:1; the surface dimensions equal the image's.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::EmptySurface`] if the image has zero
    /// width or height.
    pub fn from_image(image: &RgbaImage) -> Result<Self, EditorError> {
        let Some(mut pixmap) = Pixmap::new(image.width(), image.height()) else {
            return Err(EditorError::EmptySurface);
        };

        // Straight RGBA -> premultiplied, pixel for pixel.
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }

        Ok(Self {
            pristine: pixmap.clone(),
            surface: pixmap,
            brush_width: DEFAULT_BRUSH_WIDTH,
            display_size: None,
            active: None,
        })
    }

    /// Native surface dimensions in pixels.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.surface.width(),
            height: self.surface.height(),
        }
    }

    /// Register the size at which the surface is currently rendered.
    ///
    /// Subsequent stroke coordinates are treated as display-space and
    /// scaled by `native / display` per axis before rasterization.
    /// Passing a non-positive or non-finite size resets to the identity
    /// mapping (coordinates already in image space).
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.display_size = Some((width, height));
        } else {
            self.display_size = None;
        }
    }

    /// Set the brush width for subsequent strokes, clamped to
    /// [`MIN_BRUSH_WIDTH`]..=[`MAX_BRUSH_WIDTH`].
    pub const fn set_brush_width(&mut self, px: u32) {
        self.brush_width = if px < MIN_BRUSH_WIDTH {
            MIN_BRUSH_WIDTH
        } else if px > MAX_BRUSH_WIDTH {
            MAX_BRUSH_WIDTH
        } else {
            px
        };
    }

    /// Current brush width in pixels.
    #[must_use]
    pub const fn brush_width(&self) -> u32 {
        self.brush_width
    }

    /// Start a new stroke at a (display-space) coordinate.
    ///
    /// Any in-progress stroke is finalized first.
    pub fn begin_stroke(&mut self, point: Point) {
        let p = self.to_image_space(point);
        self.begin_at(p);
    }

    /// Extend the active stroke to a (display-space) coordinate,
    /// rasterizing the connecting segment. No-op without an active
    /// stroke.
    pub fn extend_stroke(&mut self, point: Point) {
        let p = self.to_image_space(point);
        self.extend_at(p);
    }

    /// Finalize the active stroke. No-op until the next
    /// [`begin_stroke`](Self::begin_stroke).
    pub fn end_stroke(&mut self) {
        self.active = None;
    }

    /// Replay a recorded stroke whose points are already in image space.
    ///
    /// Sets the brush width to the stroke's own width (clamped), then
    /// rasterizes the gesture start to finish. Display-size translation
    /// does not apply -- stroke scripts record native coordinates.
    pub fn apply_stroke(&mut self, stroke: &Stroke) {
        self.set_brush_width(stroke.width);
        let mut points = stroke.points.iter().copied();
        let Some(first) = points.next() else {
            return;
        };
        self.begin_at(first);
        for p in points {
            self.extend_at(p);
        }
        self.end_stroke();
    }

    /// Discard all strokes and restore the pristine source image.
    pub fn clear(&mut self) {
        self.surface = self.pristine.clone();
        self.active = None;
    }

    /// Export the painted surface as a straight-alpha RGBA image.
    ///
    /// Alpha and fully opaque pixels round-trip exactly. Translucent
    /// source pixels pass through premultiplied storage, so their RGB
    /// channels can drift by the quantization error of `c * a / 255`
    /// (a couple of values at mid alpha), and fully transparent pixels
    /// collapse to `(0, 0, 0, 0)`. An HTML canvas behaves the same way.
    #[must_use]
    pub fn surface(&self) -> RgbaImage {
        demultiply(&self.surface)
    }

    /// Consume the painter and export the painted surface.
    ///
    /// Same pixel semantics as [`surface`](Self::surface).
    #[must_use]
    pub fn into_surface(self) -> RgbaImage {
        demultiply(&self.surface)
    }

    fn begin_at(&mut self, point: Point) {
        self.active = Some(vec![point]);
    }

    fn extend_at(&mut self, point: Point) {
        let Some(points) = self.active.as_mut() else {
            return;
        };
        let Some(&prev) = points.last() else {
            return;
        };
        points.push(point);
        if prev.distance_squared(point) > 0.0 {
            let width = self.brush_width;
            self.draw_segment(prev, point, width);
        }
    }

    /// Translate a display-space coordinate to image-pixel space.
    fn to_image_space(&self, point: Point) -> Point {
        let Some((dw, dh)) = self.display_size else {
            return point;
        };
        let scale_x = f64::from(self.surface.width()) / dw;
        let scale_y = f64::from(self.surface.height()) / dh;
        Point::new(point.x * scale_x, point.y * scale_y)
    }

    /// Rasterize one line segment in the marker color.
    ///
    /// Round caps and joins give continuous gestures smooth coverage;
    /// overlapping caps between consecutive segments are harmless since
    /// the paint is fully opaque.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_segment(&mut self, from: Point, to: Point, width: u32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(MARKER_COLOR[0], MARKER_COLOR[1], MARKER_COLOR[2], MARKER_COLOR[3]);
        // Hard-edged coverage: a pixel is either fully the marker color
        // or untouched, so the extracted mask is binary by construction.
        paint.anti_alias = false;

        let stroke = StrokeStyle {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..StrokeStyle::default()
        };

        self.surface
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Convert a premultiplied pixmap to a straight-alpha `RgbaImage`.
#[allow(clippy::cast_possible_truncation)]
fn demultiply(pixmap: &Pixmap) -> RgbaImage {
    let data = pixmap.data();
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (i, pixel) in img.pixels_mut().enumerate() {
        let off = i * 4;
        let a = data[off + 3];
        if a == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            // Un-premultiply: channel = premultiplied * 255 / alpha.
            let r = u16::from(data[off]) * 255 / u16::from(a);
            let g = u16::from(data[off + 1]) * 255 / u16::from(a);
            let b = u16::from(data[off + 2]) * 255 / u16::from(a);
            *pixel = Rgba([r as u8, g as u8, b as u8, a]);
        }
    }
    img
}
