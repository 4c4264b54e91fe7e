//! Trailing-marker strategy for AVIF/HEIC/HEIF.
//!
//! These containers expose no pixel alpha data through the adapter, so the
//! watermark is appended to the file bytes as `WM_START` + UTF-8 text +
//! `WM_END`. Readers that honor the container's box structure ignore the
//! trailer; verification searches the raw bytes for the marker pair.

use crate::codec::Verification;
use crate::error::WatermarkError;
use crate::formats::{MARKER_END, MARKER_START};

/// Append a marker-delimited watermark trailer to the file bytes.
pub fn add_watermark(bytes: &[u8], text: &str) -> Result<Vec<u8>, WatermarkError> {
    if bytes.is_empty() {
        return Err(WatermarkError::ImageDecode(image::ImageError::Decoding(
            image::error::DecodingError::new(
                image::error::ImageFormatHint::Unknown,
                "empty input file",
            ),
        )));
    }

    let mut out =
        Vec::with_capacity(bytes.len() + MARKER_START.len() + text.len() + MARKER_END.len());
    out.extend_from_slice(bytes);
    out.extend_from_slice(MARKER_START);
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(MARKER_END);
    Ok(out)
}

/// Search for the trailer and verify its text against `expected_text`.
pub fn check_watermark(bytes: &[u8], expected_text: &str) -> Result<Verification, WatermarkError> {
    let start = find(bytes, MARKER_START).ok_or(WatermarkError::WatermarkNotFound)?;
    let inner_start = start + MARKER_START.len();
    let end = find(&bytes[inner_start..], MARKER_END).ok_or(WatermarkError::WatermarkNotFound)?;

    let recovered = String::from_utf8_lossy(&bytes[inner_start..inner_start + end]).into_owned();
    Ok(Verification {
        matched: recovered == expected_text,
        recovered,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_check() {
        let file = b"\x00\x00\x00\x1cftypavif-fake-payload".to_vec();
        let marked = add_watermark(&file, "press-kit").unwrap();
        assert!(marked.starts_with(&file));

        let verification = check_watermark(&marked, "press-kit").unwrap();
        assert!(verification.matched);
        assert_eq!(verification.recovered, "press-kit");
    }

    #[test]
    fn test_empty_watermark_round_trips() {
        let marked = add_watermark(b"ftyp", "").unwrap();
        let verification = check_watermark(&marked, "").unwrap();
        assert!(verification.matched);
    }

    #[test]
    fn test_clean_file_has_no_watermark() {
        let err = check_watermark(b"ftypheic-no-trailer", "x").unwrap_err();
        assert!(matches!(err, WatermarkError::WatermarkNotFound));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = add_watermark(b"", "x").unwrap_err();
        assert!(matches!(err, WatermarkError::ImageDecode(_)));
    }
}
