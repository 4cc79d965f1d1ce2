//! Shared types for the lienzo mask-editing core.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference editor
/// surfaces and masks without depending on `image` directly.
pub use image::RgbaImage;

/// The reserved marker color strokes are painted with: solid magenta.
///
/// The mask extractor recognizes exactly this color as "marked for
/// removal". It is reserved by convention -- product photos must not
/// legitimately contain it -- and the painter never draws anything else.
pub const MARKER_COLOR: [u8; 4] = [255, 0, 255, 255];

/// Minimum brush width in pixels. Narrower requests are clamped up.
pub const MIN_BRUSH_WIDTH: u32 = 5;

/// Maximum brush width in pixels. Wider requests are clamped down.
pub const MAX_BRUSH_WIDTH: u32 = 100;

/// Default brush width in pixels.
pub const DEFAULT_BRUSH_WIDTH: u32 = 40;

/// A 2D point in image-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// One continuous freehand drawing gesture.
///
/// Points are in image-pixel space (not display space). Strokes are
/// transient editing state, but serde support lets callers record and
/// replay a session as a stroke script (the CLI's input format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Brush width in pixels. Clamped to
    /// [`MIN_BRUSH_WIDTH`]..=[`MAX_BRUSH_WIDTH`] when rasterized.
    pub width: u32,
    /// Ordered gesture points, pointer-down through pointer-up.
    pub points: Vec<Point>,
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Result of running a full editing session through [`crate::process`].
///
/// Carries both the binary mask (the artifact an inpainting service
/// consumes) and the painted surface, so callers can display the
/// overlay the user drew alongside submitting the mask.
#[derive(Debug, Clone)]
pub struct MaskResult {
    /// Binary mask: opaque black where painted, transparent elsewhere.
    pub mask: RgbaImage,
    /// The source image with strokes rasterized on top.
    pub surface: RgbaImage,
    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur in the mask-editing core.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Failed to decode the source image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The source image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// A surface with zero width or height was supplied.
    #[error("surface has zero width or height")]
    EmptySurface,

    /// The requested aspect ratio cannot produce a crop.
    #[error("invalid aspect ratio: {0}")]
    InvalidRatio(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert!((a.distance_squared(b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn stroke_json_round_trip() {
        let stroke = Stroke {
            width: 40,
            points: vec![Point::new(10.0, 10.0), Point::new(10.0, 50.0)],
        };
        let json = serde_json::to_string(&stroke).unwrap();
        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }

    #[test]
    fn marker_color_is_opaque_magenta() {
        assert_eq!(MARKER_COLOR, [255, 0, 255, 255]);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = EditorError::InvalidRatio("target ratio must be positive, got -1".into());
        assert!(err.to_string().contains("invalid aspect ratio"));
        assert!(EditorError::EmptyInput.to_string().contains("empty"));
    }
}
