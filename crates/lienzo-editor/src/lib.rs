//! lienzo-editor: Pure mask-editing core (sans-IO).
//!
//! Turns a product photo plus freehand removal strokes into the binary
//! mask an external inpainting/removal service expects, through:
//! decode -> stroke rasterization -> mask extraction. A separate
//! aspect-ratio compositor center-crops and resamples images for
//! fixed-width export framing.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and `image` buffers and returns structured data. All
//! filesystem, network, and UI interaction lives with the caller
//! (`lienzo-cli`, or the surrounding application).

pub mod crop;
pub mod decode;
pub mod mask;
pub mod painter;
pub mod types;

pub use crop::{AspectRatio, CropRect, EXPORT_WIDTH, crop_rect, export_with_ratio};
pub use decode::decode_rgba;
pub use mask::{MaskPolicy, extract_mask};
pub use painter::MaskPainter;
pub use types::{Dimensions, EditorError, MARKER_COLOR, MaskResult, Point, RgbaImage, Stroke};

/// Run a full editing session in one call.
///
/// Takes raw source image bytes (PNG, JPEG, BMP, WebP) and a recorded
/// stroke script (points in image-pixel space), and produces a
/// [`MaskResult`] containing the binary mask, the painted surface, and
/// the source dimensions.
///
/// # Pipeline steps
///
/// 1. Decode the source image at native resolution
/// 2. Rasterize each stroke with round caps/joins in the marker color
/// 3. Extract the binary mask under the given policy
///
/// An empty stroke script is valid and yields a fully transparent mask.
///
/// # Errors
///
/// Returns [`EditorError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`EditorError::ImageDecode`] if the image cannot be decoded.
/// Returns [`EditorError::EmptySurface`] if the decoded image has zero
/// area.
pub fn process(
    image_bytes: &[u8],
    strokes: &[Stroke],
    policy: MaskPolicy,
) -> Result<MaskResult, EditorError> {
    // 1. Decode the source and size the surface to it.
    let mut painter = MaskPainter::from_bytes(image_bytes)?;
    let dimensions = painter.dimensions();

    // 2. Rasterize strokes in arrival order.
    for stroke in strokes {
        painter.apply_stroke(stroke);
    }
    let surface = painter.into_surface();

    // 3. Extract the binary mask.
    let mask = extract_mask(&surface, policy)?;

    Ok(MaskResult {
        mask,
        surface,
        dimensions,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Create an in-memory PNG filled with a single color.
    fn uniform_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn process_empty_input() {
        let result = process(&[], &[], MaskPolicy::default());
        assert!(matches!(result, Err(EditorError::EmptyInput)));
    }

    #[test]
    fn process_corrupt_input() {
        let result = process(&[0xFF, 0x00], &[], MaskPolicy::default());
        assert!(matches!(result, Err(EditorError::ImageDecode(_))));
    }

    #[test]
    fn process_without_strokes_yields_transparent_mask() {
        let png = uniform_png(32, 24, [200, 200, 200, 255]);
        let result = process(&png, &[], MaskPolicy::default()).unwrap();
        assert_eq!(
            result.dimensions,
            Dimensions {
                width: 32,
                height: 24
            }
        );
        assert!(result.mask.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn process_with_stroke_marks_painted_region() {
        let png = uniform_png(100, 100, [255, 255, 255, 255]);
        let strokes = [Stroke {
            width: 10,
            points: vec![Point::new(10.0, 10.0), Point::new(10.0, 50.0)],
        }];
        let result = process(&png, &strokes, MaskPolicy::default()).unwrap();

        assert_eq!(result.mask.get_pixel(10, 30).0, [0, 0, 0, 255]);
        assert_eq!(result.mask.get_pixel(80, 80).0, [0, 0, 0, 0]);
        // The painted surface shows the marker overlay for preview.
        assert_eq!(result.surface.get_pixel(10, 30).0, MARKER_COLOR);
    }
}
