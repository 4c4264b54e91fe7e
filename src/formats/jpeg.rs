//! Metadata-segment strategy for JPEG.
//!
//! JPEG recompresses pixel data, so alpha-LSB embedding would not survive.
//! The watermark is stored as a COM (comment, 0xFFFE) segment instead:
//! `WM_START` + UTF-8 text + `WM_END`, inserted after any leading APPn
//! segments so JFIF/EXIF headers keep their required position. Verification
//! scans the segment stream up to SOS.

use crate::codec::Verification;
use crate::error::WatermarkError;
use crate::formats::{MARKER_END, MARKER_START};

const SOI: [u8; 2] = [0xFF, 0xD8];
const COM: u8 = 0xFE;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;

// Segment length field is u16 and includes its own two bytes.
const MAX_SEGMENT_BODY: usize = 0xFFFF - 2;

fn malformed(reason: &'static str) -> WatermarkError {
    WatermarkError::ImageDecode(image::ImageError::Decoding(
        image::error::DecodingError::new(
            image::error::ImageFormatHint::Exact(image::ImageFormat::Jpeg),
            reason,
        ),
    ))
}

/// Insert a COM segment carrying the watermark into a JPEG stream.
pub fn add_watermark(bytes: &[u8], text: &str) -> Result<Vec<u8>, WatermarkError> {
    if bytes.len() < 2 || bytes[..2] != SOI {
        return Err(malformed("missing SOI marker"));
    }

    let body_len = MARKER_START.len() + text.len() + MARKER_END.len();
    if body_len > MAX_SEGMENT_BODY {
        return Err(WatermarkError::PayloadTooLarge {
            len: body_len,
            max: MAX_SEGMENT_BODY,
        });
    }

    let insert_at = end_of_leading_app_segments(bytes)?;

    let mut out = Vec::with_capacity(bytes.len() + 4 + body_len);
    out.extend_from_slice(&bytes[..insert_at]);
    out.extend_from_slice(&[0xFF, COM]);
    out.extend_from_slice(&((body_len + 2) as u16).to_be_bytes());
    out.extend_from_slice(MARKER_START);
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(MARKER_END);
    out.extend_from_slice(&bytes[insert_at..]);
    Ok(out)
}

/// Scan COM segments for the watermark and verify it against `expected_text`.
///
/// Fails with [`WatermarkError::WatermarkNotFound`] if no marker-delimited
/// COM segment exists before SOS.
pub fn check_watermark(bytes: &[u8], expected_text: &str) -> Result<Verification, WatermarkError> {
    if bytes.len() < 2 || bytes[..2] != SOI {
        return Err(malformed("missing SOI marker"));
    }

    let mut pos = 2;
    while let Some((marker, body, next)) = read_segment(bytes, pos)? {
        if marker == SOS {
            break;
        }
        if marker == COM
            && body.len() >= MARKER_START.len() + MARKER_END.len()
            && body.starts_with(MARKER_START)
            && body.ends_with(MARKER_END)
        {
            let inner = &body[MARKER_START.len()..body.len() - MARKER_END.len()];
            let recovered = String::from_utf8_lossy(inner).into_owned();
            return Ok(Verification {
                matched: recovered == expected_text,
                recovered,
            });
        }
        pos = next;
    }
    Err(WatermarkError::WatermarkNotFound)
}

/// Offset just past SOI and any APPn segments, where the COM segment goes.
fn end_of_leading_app_segments(bytes: &[u8]) -> Result<usize, WatermarkError> {
    let mut pos = 2;
    while let Some((marker, _, next)) = read_segment(bytes, pos)? {
        if !(0xE0..=0xEF).contains(&marker) {
            break;
        }
        pos = next;
    }
    Ok(pos)
}

/// Read the segment starting at `pos`, returning `(marker, body, next_pos)`.
///
/// Returns `Ok(None)` at end of stream. Standalone markers (RST0-7, EOI)
/// have no length field and an empty body.
fn read_segment(bytes: &[u8], pos: usize) -> Result<Option<(u8, &[u8], usize)>, WatermarkError> {
    if pos >= bytes.len() {
        return Ok(None);
    }
    if bytes[pos] != 0xFF || pos + 1 >= bytes.len() {
        return Err(malformed("expected segment marker"));
    }
    let marker = bytes[pos + 1];

    if marker == EOI || (0xD0..=0xD7).contains(&marker) {
        return Ok(Some((marker, &[], pos + 2)));
    }

    if pos + 4 > bytes.len() {
        return Err(malformed("truncated segment header"));
    }
    let length = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
    if length < 2 || pos + 2 + length > bytes.len() {
        return Err(malformed("segment length out of bounds"));
    }
    let body = &bytes[pos + 4..pos + 2 + length];
    Ok(Some((marker, body, pos + 2 + length)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn jpeg_fixture() -> Vec<u8> {
        let img = RgbImage::from_pixel(8, 8, Rgb([120, 90, 60]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    #[test]
    fn test_add_then_check() {
        let marked = add_watermark(&jpeg_fixture(), "studio-17").unwrap();
        let verification = check_watermark(&marked, "studio-17").unwrap();
        assert!(verification.matched);
        assert_eq!(verification.recovered, "studio-17");
    }

    #[test]
    fn test_marked_jpeg_still_decodes() {
        let marked = add_watermark(&jpeg_fixture(), "studio-17").unwrap();
        assert!(image::load_from_memory(&marked).is_ok());
    }

    #[test]
    fn test_wrong_expectation_returns_recovered() {
        let marked = add_watermark(&jpeg_fixture(), "alice").unwrap();
        let verification = check_watermark(&marked, "bob").unwrap();
        assert!(!verification.matched);
        assert_eq!(verification.recovered, "alice");
    }

    #[test]
    fn test_clean_jpeg_has_no_watermark() {
        let err = check_watermark(&jpeg_fixture(), "anything").unwrap_err();
        assert!(matches!(err, WatermarkError::WatermarkNotFound));
    }

    #[test]
    fn test_missing_soi_is_decode_error() {
        let err = add_watermark(b"GIF89a", "x").unwrap_err();
        assert!(matches!(err, WatermarkError::ImageDecode(_)));
    }
}
