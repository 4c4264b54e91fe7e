//! Alpha-LSB strategy for lossless containers (PNG, WEBP).
//!
//! These formats preserve pixel data bit-for-bit, so the watermark survives a
//! decode/re-encode cycle in the alpha channel. WEBP output uses the `image`
//! crate's lossless encoder for the same reason.

use image::ImageFormat;

use crate::codec::{embed_watermark, extract_and_verify, Verification};
use crate::container;
use crate::error::WatermarkError;

/// Decode, embed into the alpha LSBs, and re-encode as `format`.
///
/// An oversized payload is truncated per the codec's capacity policy; the
/// condition is logged by the codec and visible to callers that use the
/// codec API directly.
pub fn add_watermark(
    bytes: &[u8],
    text: &str,
    format: ImageFormat,
) -> Result<Vec<u8>, WatermarkError> {
    let mut pixels = container::decode(bytes)?;
    embed_watermark(&mut pixels, text)?;
    container::encode(&pixels, format)
}

/// Decode and verify the alpha-LSB watermark against `expected_text`.
pub fn check_watermark(bytes: &[u8], expected_text: &str) -> Result<Verification, WatermarkError> {
    let pixels = container::decode(bytes)?;
    extract_and_verify(&pixels, expected_text)
}
