//! # Error Types
//!
//! Typed error taxonomy for the watermarking pipeline. Every lossy or fallible
//! step surfaces as a distinct variant so callers can react per condition
//! instead of parsing messages.

use thiserror::Error;

/// Errors that can occur while embedding or verifying a watermark.
#[derive(Error, Debug)]
pub enum WatermarkError {
    /// The input bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Re-encoding the pixel buffer to the target container failed.
    #[error("Failed to encode image as {format:?}: {source}")]
    ImageEncode {
        /// Target container format.
        format: image::ImageFormat,
        /// Underlying encoder error.
        source: image::ImageError,
    },

    /// A watermark character does not fit in one byte of payload.
    ///
    /// The bit codec allocates exactly 8 bits per character, so only code
    /// points up to U+00FF are representable. Wider characters fail loudly
    /// instead of being wrapped modulo 256.
    #[error("Character {ch:?} at index {index} has code point {code} and cannot be encoded in one byte")]
    UnencodableCharacter {
        /// The offending character.
        ch: char,
        /// Its index within the watermark text.
        index: usize,
        /// Its Unicode code point.
        code: u32,
    },

    /// The pixel buffer holds fewer bits than the caller asked to read.
    ///
    /// Extraction never truncates: reading a 40-bit watermark from a
    /// 4-pixel image is an error, not a shorter answer.
    #[error("Pixel buffer too small: {needed} bits requested but only {available} available")]
    InsufficientData {
        /// Bits the buffer can supply (one per pixel).
        available: usize,
        /// Bits the caller asked for.
        needed: usize,
    },

    /// No watermark marker was found in the file (metadata and trailing-marker
    /// strategies only; the alpha-LSB scheme has no marker to miss).
    #[error("No watermark found in file")]
    WatermarkNotFound,

    /// The watermark text does not fit in the target metadata segment.
    #[error("Watermark payload of {len} bytes exceeds segment capacity of {max} bytes")]
    PayloadTooLarge {
        /// Marker-delimited payload size in bytes.
        len: usize,
        /// Largest payload the segment can carry.
        max: usize,
    },

    /// A file extension that does not map to a supported watermark format.
    #[error("Unsupported image format: {0:?}")]
    UnsupportedFormat(String),
}
