//! Source image decoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces an RGBA
//! surface at the image's native resolution, ready for the painter.
//!
//! This is the first step in an editing session: raw bytes in,
//! `RgbaImage` out. The only suspension point the surrounding
//! application needs (awaiting an upload or fetch) happens before this
//! call; decoding itself is synchronous.

use image::RgbaImage;

use crate::types::EditorError;

/// Decode raw image bytes into an RGBA surface.
///
/// Supports PNG, JPEG, BMP, and WebP (whatever the `image` crate can
/// decode). Pixels are copied 1:1 -- the surface has exactly the source
/// image's native dimensions, never its displayed size.
///
/// # Errors
///
/// Returns [`EditorError::EmptyInput`] if `bytes` is empty.
/// Returns [`EditorError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
/// Returns [`EditorError::EmptySurface`] if the decoded image has zero
/// width or height.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, EditorError> {
    if bytes.is_empty() {
        return Err(EditorError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?.to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(EditorError::EmptySurface);
    }
    Ok(img)
}
