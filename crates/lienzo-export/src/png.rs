//! PNG serialization for editor surfaces and masks.
//!
//! These are pure functions with no I/O -- they return byte buffers.
//! [`mask_to_png`] additionally enforces the binary-mask invariant so a
//! malformed mask can never reach the external service.

use image::ImageEncoder;
use lienzo_editor::RgbaImage;

/// Errors that can occur while serializing editor outputs.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    /// A mask contained a pixel outside the two canonical states.
    #[error("mask is not binary: pixel at ({x}, {y}) is {rgba:?}")]
    NotBinary {
        /// Column of the offending pixel.
        x: u32,
        /// Row of the offending pixel.
        y: u32,
        /// The offending pixel's RGBA channels.
        rgba: [u8; 4],
    },
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        Self::PngEncode(err.to_string())
    }
}

/// Encode an RGBA image as lossless PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::PngEncode`] if encoding fails.
pub fn to_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Encode a binary mask as lossless PNG bytes.
///
/// Validates before encoding that every pixel is either opaque black
/// `(0, 0, 0, 255)` or fully transparent `(0, 0, 0, 0)` -- the exact
/// convention the external image-generation service expects for its
/// edit-region input.
///
/// # Errors
///
/// Returns [`ExportError::NotBinary`] naming the first offending pixel
/// if the invariant is violated, or [`ExportError::PngEncode`] if
/// encoding fails.
pub fn mask_to_png(mask: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel.0 != [0, 0, 0, 255] && pixel.0 != [0, 0, 0, 0] {
            return Err(ExportError::NotBinary {
                x,
                y,
                rgba: pixel.0,
            });
        }
    }
    to_png(mask)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_round_trips_rgba_content() {
        let image = RgbaImage::from_fn(9, 5, |x, y| {
            Rgba([
                u8::try_from(x * 20).unwrap(),
                u8::try_from(y * 40).unwrap(),
                3,
                255,
            ])
        });
        let bytes = to_png(&image).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn valid_mask_encodes() {
        let mask = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let bytes = mask_to_png(&mask).unwrap();
        assert!(!bytes.is_empty());

        // The binary convention survives the PNG round trip exactly.
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), mask.as_raw());
    }

    #[test]
    fn non_binary_mask_is_rejected() {
        let mut mask = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        mask.put_pixel(2, 1, Rgba([0, 0, 0, 128]));

        let err = mask_to_png(&mask).unwrap_err();
        assert!(
            matches!(
                err,
                ExportError::NotBinary {
                    x: 2,
                    y: 1,
                    rgba: [0, 0, 0, 128],
                }
            ),
            "expected NotBinary at (2, 1), got {err}"
        );
    }

    #[test]
    fn non_black_painted_pixel_is_rejected() {
        let mut mask = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 0]));
        mask.put_pixel(0, 0, Rgba([255, 0, 255, 255]));
        assert!(matches!(
            mask_to_png(&mask),
            Err(ExportError::NotBinary { x: 0, y: 0, .. })
        ));
    }
}
