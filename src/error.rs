//! Error types for asset generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for asset generation
#[derive(Error, Debug)]
pub enum Error {
    /// Output directory could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// Artifact could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Rendered code did not decode back to its input
    #[error("Verification failed for {file}: expected '{expected}', decoded '{actual}'")]
    Verification {
        /// Asset file name
        file: String,
        /// Text that was encoded
        expected: String,
        /// Text the decoder produced
        actual: String,
    },

    /// Color string is not a hex color
    #[error("Invalid color '{0}': expected #RGB or #RRGGBB")]
    InvalidColor(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}
