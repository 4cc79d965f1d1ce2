//! lienzo-export: Pure lossless raster serializers (sans-IO).
//!
//! Encodes editor outputs into PNG byte buffers: the binary mask handed
//! to an external inpainting service as its edit-region input, and the
//! aspect-ratio export raster handed to a download/persistence
//! collaborator. PNG is used throughout -- the mask's binary
//! transparent/opaque-black convention must survive encoding exactly,
//! which rules out lossy formats.

pub mod png;

pub use png::{ExportError, mask_to_png, to_png};
