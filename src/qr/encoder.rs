//! QR code encoder

use crate::error::{Error, Result};
use qrcode::{EcLevel, QrCode};

/// QR code encoder
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::M,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self { ecc_level }
    }

    /// Error correction level used for new codes
    pub fn ecc_level(&self) -> EcLevel {
        self.ecc_level
    }

    /// Encode text into a QR module grid.
    pub fn encode(&self, data: &str) -> Result<QrCode> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("'{data}': {e}")))?;

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            ecc_level = ?self.ecc_level,
            "Encoded QR code"
        );

        Ok(code)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an error correction level letter (`L`, `M`, `Q`, `H`).
pub fn parse_ecc_level(value: &str) -> Option<EcLevel> {
    match value.trim().to_ascii_uppercase().as_str() {
        "L" => Some(EcLevel::L),
        "M" => Some(EcLevel::M),
        "Q" => Some(EcLevel::Q),
        "H" => Some(EcLevel::H),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrcode::Version;

    #[test]
    fn test_default_is_medium() {
        assert_eq!(QrEncoder::new().ecc_level(), EcLevel::M);
    }

    #[test]
    fn test_encode_pitch_url() {
        let code = QrEncoder::new()
            .encode("https://investor-pitch.onestrategy.app")
            .unwrap();
        // 38 bytes fits version 3 at level M
        assert_eq!(code.version(), Version::Normal(3));
        assert_eq!(code.width(), 29);
    }

    #[test]
    fn test_higher_ecc_needs_more_modules() {
        let url = "https://investor-pitch.onestrategy.app";
        let low = QrEncoder::with_ecc_level(EcLevel::L).encode(url).unwrap();
        let high = QrEncoder::with_ecc_level(EcLevel::H).encode(url).unwrap();
        assert!(high.width() > low.width());
    }

    #[test]
    fn test_oversized_payload_fails() {
        let data = "x".repeat(8000);
        let result = QrEncoder::new().encode(&data);
        assert!(matches!(result, Err(Error::QrEncode(_))));
    }

    #[test]
    fn test_parse_ecc_level() {
        assert_eq!(parse_ecc_level("q"), Some(EcLevel::Q));
        assert_eq!(parse_ecc_level(" H "), Some(EcLevel::H));
        assert_eq!(parse_ecc_level("X"), None);
    }
}
