//! # Steganographic Codec
//!
//! The algorithmic core of the crate:
//!
//! - [`bits`]: deterministic conversion between watermark text and a
//!   fixed-width-per-character bit sequence
//! - [`alpha`]: embedding and extraction of a bit sequence in the
//!   least-significant bit of a pixel buffer's alpha channel

pub mod alpha;
pub mod bits;

pub use alpha::{embed_watermark, extract_and_verify, extract_bits, EmbedReport, Verification};
pub use bits::{bits_to_text, text_to_bits, BitSequence};
