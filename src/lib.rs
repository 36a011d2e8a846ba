//! qrassets - QR code assets for the investor pitch site
//!
//! Encodes the pitch URL once and renders it into a fixed set of styled
//! artifacts: an accent-colored PNG for the dark site theme, a black-on-white
//! PNG for print, and an accent-colored SVG.
//!
//! # Example
//!
//! ```no_run
//! use qrassets::{AssetGenerator, AssetsConfig};
//!
//! #[tokio::main]
//! async fn main() -> qrassets::Result<()> {
//!     let config = AssetsConfig::default();
//!     let generator = AssetGenerator::from_config(&config)?;
//!
//!     for artifact in generator.generate().await? {
//!         println!("wrote {}", artifact.path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod qr;
pub mod style;

// Re-exports for convenience
pub use error::{Error, Result};

pub use assets::{Artifact, AssetGenerator, AssetSpec, default_assets};
pub use config::{AssetsConfig, LogRotation, LoggingOptions, PLACEHOLDER_URL};
pub use qr::{DecodedQr, QrDecoder, QrEncoder};
pub use style::{HexColor, OutputFormat, Style};
