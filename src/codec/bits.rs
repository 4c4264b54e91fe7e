//! # Text <-> Bit Codec
//!
//! Deterministic conversion between watermark text and its bit-level payload.
//! Each character occupies exactly 8 bits (MSB first), concatenated in input
//! order, with no length field or terminator. `bits_to_text(text_to_bits(t))`
//! returns `t` for every single-byte-representable `t`.

use crate::error::WatermarkError;

/// An ordered sequence of payload bits, one `u8` per bit, each 0 or 1.
pub type BitSequence = Vec<u8>;

/// Convert watermark text to its bit-level payload.
///
/// Each character contributes its code point as 8 bits, most-significant
/// bit first. Characters above U+00FF do not fit in one byte and fail with
/// [`WatermarkError::UnencodableCharacter`] rather than being silently
/// wrapped.
///
/// # Example
/// ```
/// use image_watermarker::text_to_bits;
///
/// let bits = text_to_bits("hi").unwrap();
/// assert_eq!(bits.len(), 16);
/// ```
pub fn text_to_bits(text: &str) -> Result<BitSequence, WatermarkError> {
    let mut bits = Vec::with_capacity(text.chars().count() * 8);
    for (index, ch) in text.chars().enumerate() {
        let code = ch as u32;
        if code > 0xFF {
            return Err(WatermarkError::UnencodableCharacter { ch, index, code });
        }
        let byte = code as u8;
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    Ok(bits)
}

/// Convert a bit sequence back to text.
///
/// Bits are grouped into consecutive 8-bit chunks left to right; each chunk
/// is read MSB first as a code point. A trailing group shorter than 8 bits
/// carries no complete character and is dropped.
pub fn bits_to_text(bits: &[u8]) -> String {
    bits.chunks_exact(8)
        .map(|chunk| {
            let byte = chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
            byte as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit_string(bits: &[u8]) -> String {
        bits.iter().map(|b| if *b == 1 { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_hello_bit_pattern() {
        let bits = text_to_bits("hello").unwrap();
        assert_eq!(
            bit_string(&bits),
            "0110100001100101011011000110110001101111"
        );
    }

    #[test]
    fn test_hello_round_trip() {
        let bits = text_to_bits("hello").unwrap();
        assert_eq!(bits_to_text(&bits), "hello");
    }

    #[test]
    fn test_empty_text() {
        assert!(text_to_bits("").unwrap().is_empty());
        assert_eq!(bits_to_text(&[]), "");
    }

    #[test]
    fn test_full_byte_range_round_trips() {
        let text: String = (1u8..=255).map(|b| b as char).collect();
        let bits = text_to_bits(&text).unwrap();
        assert_eq!(bits.len(), 255 * 8);
        assert_eq!(bits_to_text(&bits), text);
    }

    #[test]
    fn test_wide_character_rejected() {
        let err = text_to_bits("ok\u{03A9}").unwrap_err();
        match err {
            crate::error::WatermarkError::UnencodableCharacter { ch, index, code } => {
                assert_eq!(ch, '\u{03A9}');
                assert_eq!(index, 2);
                assert_eq!(code, 0x03A9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_partial_group_dropped() {
        let mut bits = text_to_bits("ab").unwrap();
        bits.extend_from_slice(&[0, 1, 1]);
        assert_eq!(bits_to_text(&bits), "ab");
    }
}
