//! Aspect-ratio center-crop and export resampling.
//!
//! Given a source image and a target aspect ratio, computes the largest
//! centered crop rectangle matching the ratio, then resamples the crop
//! to a fixed-width output raster for download/export. The crop is
//! deterministic: a relatively wider target keeps full source width and
//! trims height symmetrically; a taller-or-equal target keeps full
//! height and trims width symmetrically.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, EditorError};

/// Width of exported rasters in pixels. Export height is derived from
/// the target ratio.
pub const EXPORT_WIDTH: u32 = 1080;

/// Named target aspect ratios offered for export framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 1:1 -- square feed posts.
    Square,
    /// 9:16 -- vertical stories/reels.
    Vertical,
    /// 16:9 -- horizontal video.
    Horizontal,
}

impl AspectRatio {
    /// Numeric width/height ratio.
    #[must_use]
    pub const fn ratio(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Vertical => 9.0 / 16.0,
            Self::Horizontal => 16.0 / 9.0,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => f.write_str("1:1"),
            Self::Vertical => f.write_str("9:16"),
            Self::Horizontal => f.write_str("16:9"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" => Ok(Self::Square),
            "9:16" => Ok(Self::Vertical),
            "16:9" => Ok(Self::Horizontal),
            other => Err(EditorError::InvalidRatio(format!(
                "unknown ratio '{other}', expected 1:1, 9:16, or 16:9"
            ))),
        }
    }
}

/// A crop region in source-image pixel space.
///
/// Always fully contained within the source bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Compute the centered crop rectangle for a target width/height ratio.
///
/// Crop side lengths round half-up to integer pixels; crop origins use
/// integer halving of the leftover margin, so a 400x800 source at 16:9
/// crops to 400x225 at y = 287.
///
/// # Errors
///
/// Returns [`EditorError::InvalidRatio`] if `target_ratio` is
/// non-positive or non-finite, or if the source has zero area.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn crop_rect(source: Dimensions, target_ratio: f64) -> Result<CropRect, EditorError> {
    if !target_ratio.is_finite() || target_ratio <= 0.0 {
        return Err(EditorError::InvalidRatio(format!(
            "target ratio must be positive and finite, got {target_ratio}"
        )));
    }
    if source.width == 0 || source.height == 0 {
        return Err(EditorError::InvalidRatio(format!(
            "source image has zero area ({}x{})",
            source.width, source.height
        )));
    }

    let w = f64::from(source.width);
    let h = f64::from(source.height);
    let image_ratio = w / h;

    let rect = if target_ratio > image_ratio {
        // Target is relatively wider: keep full width, trim height.
        let crop_h = (w / target_ratio).round().max(1.0).min(h) as u32;
        CropRect {
            x: 0,
            y: (source.height - crop_h) / 2,
            width: source.width,
            height: crop_h,
        }
    } else {
        // Target is relatively taller or equal: keep full height, trim width.
        let crop_w = (h * target_ratio).round().max(1.0).min(w) as u32;
        CropRect {
            x: (source.width - crop_w) / 2,
            y: 0,
            width: crop_w,
            height: source.height,
        }
    };
    Ok(rect)
}

/// Center-crop an image to the target ratio and resample to the export
/// resolution ([`EXPORT_WIDTH`] wide, height derived from the ratio).
///
/// Resampling uses Catmull-Rom filtering.
///
/// # Errors
///
/// Returns [`EditorError::InvalidRatio`] if the source has zero area
/// (the named ratios themselves are always valid).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn export_with_ratio(image: &RgbaImage, ratio: AspectRatio) -> Result<RgbaImage, EditorError> {
    let source = Dimensions {
        width: image.width(),
        height: image.height(),
    };
    let rect = crop_rect(source, ratio.ratio())?;

    let cropped =
        image::imageops::crop_imm(image, rect.x, rect.y, rect.width, rect.height).to_image();

    let out_height = (f64::from(EXPORT_WIDTH) / ratio.ratio()).round().max(1.0) as u32;
    Ok(image::imageops::resize(
        &cropped,
        EXPORT_WIDTH,
        out_height,
        FilterType::CatmullRom,
    ))
}
