//! # Image Container Adapter
//!
//! Thin adapter over the `image` crate that moves between format-specific
//! bytes and the RGBA pixel buffer the steganographic codec operates on.
//! Sources without an alpha channel are normalized to RGBA with an opaque
//! (0xFF) alpha plane, so the codec always has 4 channels to work with.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::WatermarkError;

/// Decode arbitrary-format image bytes into an RGBA pixel buffer.
///
/// Corrupt or unsupported bytes surface as [`WatermarkError::ImageDecode`].
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, WatermarkError> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Encode an RGBA pixel buffer back to container bytes in `format`.
pub fn encode(pixels: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, WatermarkError> {
    let mut bytes = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(|source| WatermarkError::ImageEncode { format, source })?;
    Ok(bytes)
}
