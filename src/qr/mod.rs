//! QR code encoding, rendering and decoding
//!
//! Encoding is delegated to the `qrcode` crate, rendering maps the module grid
//! onto a PNG raster or SVG markup with a configurable quiet zone, and decoding
//! (via `rqrr`) is used to check rendered output.

mod decoder;
mod encoder;
pub mod render;

pub use decoder::QrDecoder;
pub use encoder::{QrEncoder, parse_ecc_level};

/// Text recovered from a rendered QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedQr {
    /// Decoded content
    pub text: String,
    /// Symbol version reported by the decoder
    pub version: usize,
    /// Whether the image had to be inverted (light modules on dark background)
    pub inverted: bool,
}

impl DecodedQr {
    /// Decoded text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
