//! # Format Dispatcher
//!
//! Routes a watermark request to the strategy a container can support:
//!
//! - [`lossless`]: PNG and WEBP keep pixel data intact, so the watermark goes
//!   into the alpha-channel LSBs via the steganographic codec
//! - [`jpeg`]: JPEG recompresses pixels, so the watermark lives in a COM
//!   metadata segment instead
//! - [`append`]: AVIF/HEIC/HEIF containers get a trailing byte marker
//!
//! One strategy per container capability; each is independently testable.

pub mod append;
pub mod jpeg;
pub mod lossless;

use image::ImageFormat;

use crate::codec::Verification;
use crate::error::WatermarkError;

/// Byte markers delimiting the watermark text in the metadata and
/// trailing-marker strategies.
pub(crate) const MARKER_START: &[u8] = b"WM_START";
pub(crate) const MARKER_END: &[u8] = b"WM_END";

/// The image containers the watermarker knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkFormat {
    Png,
    Webp,
    Jpeg,
    Avif,
    Heic,
    Heif,
}

/// How a given container carries its watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Decode to RGBA, write alpha LSBs, re-encode in the same container.
    AlphaLsb(ImageFormat),
    /// Insert a COM metadata segment into the JPEG stream.
    MetadataSegment,
    /// Append a marker-delimited trailer to the file bytes.
    TrailingMarker,
}

impl WatermarkFormat {
    /// Map a file extension (case-insensitive, no dot) to a format.
    pub fn from_extension(ext: &str) -> Result<Self, WatermarkError> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "avif" => Ok(Self::Avif),
            "heic" => Ok(Self::Heic),
            "heif" => Ok(Self::Heif),
            other => Err(WatermarkError::UnsupportedFormat(other.to_string())),
        }
    }

    fn strategy(self) -> Strategy {
        match self {
            Self::Png => Strategy::AlphaLsb(ImageFormat::Png),
            Self::Webp => Strategy::AlphaLsb(ImageFormat::WebP),
            Self::Jpeg => Strategy::MetadataSegment,
            Self::Avif | Self::Heic | Self::Heif => Strategy::TrailingMarker,
        }
    }
}

/// Embed `text` into `bytes` using the strategy for `format`, returning the
/// watermarked file bytes.
pub fn add_watermark(
    bytes: &[u8],
    text: &str,
    format: WatermarkFormat,
) -> Result<Vec<u8>, WatermarkError> {
    log::debug!("Adding watermark via {:?} strategy", format.strategy());
    match format.strategy() {
        Strategy::AlphaLsb(container) => lossless::add_watermark(bytes, text, container),
        Strategy::MetadataSegment => jpeg::add_watermark(bytes, text),
        Strategy::TrailingMarker => append::add_watermark(bytes, text),
    }
}

/// Verify that `bytes` carries the watermark `expected_text` under the
/// strategy for `format`.
pub fn check_watermark(
    bytes: &[u8],
    expected_text: &str,
    format: WatermarkFormat,
) -> Result<Verification, WatermarkError> {
    match format.strategy() {
        Strategy::AlphaLsb(_) => lossless::check_watermark(bytes, expected_text),
        Strategy::MetadataSegment => jpeg::check_watermark(bytes, expected_text),
        Strategy::TrailingMarker => append::check_watermark(bytes, expected_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(WatermarkFormat::from_extension("PNG").unwrap(), WatermarkFormat::Png);
        assert_eq!(WatermarkFormat::from_extension("jpeg").unwrap(), WatermarkFormat::Jpeg);
        assert_eq!(WatermarkFormat::from_extension("jpg").unwrap(), WatermarkFormat::Jpeg);
        assert_eq!(WatermarkFormat::from_extension("heic").unwrap(), WatermarkFormat::Heic);
        assert!(matches!(
            WatermarkFormat::from_extension("bmp"),
            Err(WatermarkError::UnsupportedFormat(_))
        ));
    }
}
