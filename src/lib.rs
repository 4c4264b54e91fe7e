//! # image-watermarker
//!
//! Embeds and verifies a short text watermark in raster images for
//! provenance tagging, without materially altering their appearance.
//!
//! ## Components
//!
//! - [`codec`]: the steganographic core: text<->bit conversion and
//!   alpha-channel LSB embed/extract over an RGBA pixel buffer
//! - [`container`]: adapter between format-specific bytes and RGBA buffers
//! - [`formats`]: per-container strategy dispatch (alpha LSB for PNG/WEBP,
//!   a metadata segment for JPEG, a trailing marker for AVIF/HEIC/HEIF)
//! - [`error`]: the typed error taxonomy shared by all of the above
//!
//! ## Limitations
//!
//! This is not robust watermarking: the payload does not survive
//! recompression, resizing, cropping, or transcoding, and anyone who
//! inspects the pixel data can read it. The alpha bit stream carries no
//! length prefix, so verification requires knowing the expected watermark;
//! blind extraction is not supported.

pub mod codec;
pub mod container;
pub mod error;
pub mod formats;

pub use codec::{
    bits_to_text, embed_watermark, extract_and_verify, extract_bits, text_to_bits, BitSequence,
    EmbedReport, Verification,
};
pub use error::WatermarkError;
pub use formats::{add_watermark, check_watermark, WatermarkFormat};
