//! Binary mask extraction from a painted surface.
//!
//! Scans the painted surface for the reserved marker color and emits a
//! mask of identical dimensions where every pixel is one of exactly two
//! states: opaque black `(0, 0, 0, 255)` for "marked for removal", or
//! fully transparent `(0, 0, 0, 0)` for "untouched". This is the edit
//! region artifact an external inpainting/removal service consumes.
//!
//! The mask is binary by construction, not by thresholding: the output
//! never contains partial alpha or non-black painted pixels, whatever
//! the input looks like.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::types::{EditorError, MARKER_COLOR};

/// Classification policy for deciding whether a pixel was painted.
///
/// A pixel counts as painted iff each of its R, G, B channels is within
/// `rgb_tolerance` of the marker color and its alpha is at least
/// `min_alpha`. The defaults (`rgb_tolerance: 0`, `min_alpha: 1`)
/// require an exact color match on any visible pixel, which is precise
/// for surfaces produced by [`crate::MaskPainter`] since its brush is
/// not anti-aliased. Surfaces painted by an anti-aliasing canvas can
/// opt into a tolerant classification instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskPolicy {
    /// Maximum per-channel distance from the marker RGB.
    pub rgb_tolerance: u8,
    /// Minimum alpha for a pixel to count as painted at all.
    pub min_alpha: u8,
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self {
            rgb_tolerance: 0,
            min_alpha: 1,
        }
    }
}

impl MaskPolicy {
    /// Whether a pixel matches the marker under this policy.
    #[must_use]
    pub fn matches(self, pixel: Rgba<u8>) -> bool {
        let [r, g, b, a] = pixel.0;
        a >= self.min_alpha
            && r.abs_diff(MARKER_COLOR[0]) <= self.rgb_tolerance
            && g.abs_diff(MARKER_COLOR[1]) <= self.rgb_tolerance
            && b.abs_diff(MARKER_COLOR[2]) <= self.rgb_tolerance
    }
}

/// Convert a painted surface into a binary mask.
///
/// The output has the same dimensions as the input. Painted pixels
/// (per `policy`) become opaque black; everything else becomes fully
/// transparent with zeroed RGB. Running the extraction twice on the
/// same surface yields byte-identical output.
///
/// A surface with no painted pixels is not an error -- the result is a
/// fully transparent mask.
///
/// # Errors
///
/// Returns [`EditorError::EmptySurface`] if the surface has zero width
/// or height.
pub fn extract_mask(surface: &RgbaImage, policy: MaskPolicy) -> Result<RgbaImage, EditorError> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err(EditorError::EmptySurface);
    }

    let mut mask = RgbaImage::new(surface.width(), surface.height());
    for (dst, src) in mask.pixels_mut().zip(surface.pixels()) {
        *dst = if policy.matches(*src) {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        };
    }
    Ok(mask)
}
