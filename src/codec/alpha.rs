//! # Alpha-Channel LSB Steganography
//!
//! Embeds a watermark payload into the least significant bit of each pixel's
//! alpha channel and recovers it again.
//!
//! ## Protocol
//!
//! - Pixels are visited in raster order: row 0 first, left to right, then each
//!   following row. Embedding and extraction MUST share this order; it is the
//!   wire contract of the scheme.
//! - The i-th visited pixel carries payload bit i: `alpha' = (alpha & 0xFE) | bit`.
//!   R, G, B and the upper 7 alpha bits are never touched.
//! - Capacity is `width * height` bits, one per pixel. A payload longer than
//!   that is truncated to capacity and the loss is reported through
//!   [`EmbedReport`] instead of being swallowed.
//! - The stream has no length field or terminator. Extraction therefore needs
//!   the expected watermark up front ("does this image carry watermark W?");
//!   blind discovery of an unknown watermark is not possible by design.

use image::RgbaImage;
use serde::Serialize;

use crate::codec::bits::{bits_to_text, text_to_bits, BitSequence};
use crate::error::WatermarkError;

/// Outcome of an embedding pass.
///
/// Capacity overflow is not an error (the reference behavior writes what
/// fits), but it must be observable: compare `bits_written` against
/// `bits_requested` or call [`EmbedReport::truncated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbedReport {
    /// Payload length in bits (8 per watermark character).
    pub bits_requested: usize,
    /// Bits actually written, capped at `width * height`.
    pub bits_written: usize,
}

impl EmbedReport {
    /// True when the pixel buffer was too small for the full payload.
    pub fn truncated(&self) -> bool {
        self.bits_written < self.bits_requested
    }
}

/// Result of verifying an image against an expected watermark.
///
/// Both fields are returned so callers can tell "no/garbled watermark"
/// (recovered text is noise) apart from "wrong expectation supplied"
/// (recovered text is a legible, different watermark).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// Whether the recovered text equals the expected watermark.
    pub matched: bool,
    /// The text actually recovered from the alpha LSBs.
    pub recovered: String,
}

/// Embed `text` into the alpha-channel LSBs of `pixels`.
///
/// Mutates the buffer in place and returns an [`EmbedReport`] describing how
/// much of the payload fit. Fails only if `text` contains a character the bit
/// codec cannot represent; capacity overflow truncates and is flagged in the
/// report, never silently.
pub fn embed_watermark(
    pixels: &mut RgbaImage,
    text: &str,
) -> Result<EmbedReport, WatermarkError> {
    let bits = text_to_bits(text)?;
    let (width, height) = pixels.dimensions();
    let capacity = width as usize * height as usize;
    let bits_written = bits.len().min(capacity);

    let mut bit_index = 0;
    'outer: for y in 0..height {
        for x in 0..width {
            if bit_index >= bits.len() {
                break 'outer;
            }

            // Only the alpha LSB changes; RGB and the upper 7 alpha bits
            // pass through untouched.
            let pixel = pixels.get_pixel_mut(x, y);
            pixel[3] = (pixel[3] & 0xFE) | bits[bit_index];
            bit_index += 1;
        }
    }

    let report = EmbedReport {
        bits_requested: bits.len(),
        bits_written,
    };
    if report.truncated() {
        log::warn!(
            "Watermark truncated: {} bits requested, {} pixels available",
            report.bits_requested,
            capacity
        );
    }
    Ok(report)
}

/// Read `expected_bit_count` bits from the alpha-channel LSBs of `pixels`,
/// in the same raster order used by [`embed_watermark`].
///
/// The read path never truncates: if the buffer holds fewer pixels than the
/// requested bit count, this fails with [`WatermarkError::InsufficientData`].
pub fn extract_bits(
    pixels: &RgbaImage,
    expected_bit_count: usize,
) -> Result<BitSequence, WatermarkError> {
    let (width, height) = pixels.dimensions();
    let available = width as usize * height as usize;
    if expected_bit_count > available {
        return Err(WatermarkError::InsufficientData {
            available,
            needed: expected_bit_count,
        });
    }

    let mut bits = Vec::with_capacity(expected_bit_count);
    'outer: for y in 0..height {
        for x in 0..width {
            if bits.len() >= expected_bit_count {
                break 'outer;
            }
            bits.push(pixels.get_pixel(x, y)[3] & 1);
        }
    }
    Ok(bits)
}

/// Verify that `pixels` carries the watermark `expected_text`.
///
/// The bit count to read is derived from `expected_text` (the stream embeds
/// no length), so this answers "does this image carry watermark W?" rather
/// than "what watermark does this image carry?".
pub fn extract_and_verify(
    pixels: &RgbaImage,
    expected_text: &str,
) -> Result<Verification, WatermarkError> {
    let expected_bits = text_to_bits(expected_text)?;
    let bits = extract_bits(pixels, expected_bits.len())?;
    let recovered = bits_to_text(&bits);
    Ok(Verification {
        matched: recovered == expected_text,
        recovered,
    })
}
