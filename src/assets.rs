//! Generation of the QR asset set
//!
//! The generator runs strictly in order: create the output directory, then
//! encode, render and write each asset. The first failure aborts the run.

use crate::config::AssetsConfig;
use crate::error::{Error, Result};
use crate::qr::render::{png_bytes, render_png, render_svg, rendered_width};
use crate::qr::{QrDecoder, QrEncoder};
use crate::style::{OutputFormat, Style};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One output file and how to draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// File name relative to the output directory
    pub file: String,
    /// Rendering parameters
    #[serde(flatten)]
    pub style: Style,
}

impl AssetSpec {
    /// Pair a file name with a style
    pub fn new(file: impl Into<String>, style: Style) -> Self {
        Self {
            file: file.into(),
            style,
        }
    }
}

/// The pitch deck asset set: accent PNG, print PNG and accent SVG.
pub fn default_assets() -> Vec<AssetSpec> {
    vec![
        AssetSpec::new("qr-code.png", Style::accent(OutputFormat::Png, 400, 2)),
        AssetSpec::new("qr-code-white.png", Style::print(OutputFormat::Png, 400, 2)),
        AssetSpec::new("qr-code.svg", Style::accent(OutputFormat::Svg, 200, 1)),
    ]
}

/// A file produced by a generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where it was written
    pub path: PathBuf,
    /// Encoding of the file
    pub format: OutputFormat,
    /// Rendered side length in pixels
    pub width: u32,
    /// Bytes written
    pub bytes: usize,
}

/// Encodes one URL into a set of styled assets
#[derive(Debug, Clone)]
pub struct AssetGenerator {
    url: String,
    output_dir: PathBuf,
    assets: Vec<AssetSpec>,
    encoder: QrEncoder,
    verify: bool,
}

impl AssetGenerator {
    /// Generator for `url` writing into `output_dir` with default encoder settings.
    pub fn new(
        url: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        assets: Vec<AssetSpec>,
    ) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
            assets,
            encoder: QrEncoder::new(),
            verify: false,
        }
    }

    /// Build a generator from a validated configuration.
    pub fn from_config(config: &AssetsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(&config.url, &config.output_dir, config.assets.clone())
            .with_encoder(QrEncoder::with_ecc_level(config.ecc_level()?))
            .with_verification(config.verify))
    }

    /// Replace the encoder
    pub fn with_encoder(mut self, encoder: QrEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Decode each rendered raster before writing it
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Directory the assets are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and write every asset in order.
    pub async fn generate(&self) -> Result<Vec<Artifact>> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| Error::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        let code = self.encoder.encode(&self.url)?;

        let mut artifacts = Vec::with_capacity(self.assets.len());
        for asset in &self.assets {
            let path = self.output_dir.join(&asset.file);
            let contents = match asset.style.format {
                OutputFormat::Png => {
                    let image = render_png(&code, &asset.style)?;
                    if self.verify {
                        self.verify_raster(&asset.file, image.clone())?;
                    }
                    png_bytes(&image)?
                }
                OutputFormat::Svg => render_svg(&code, &asset.style)?.into_bytes(),
            };

            write_artifact(&path, &contents).await?;

            let artifact = Artifact {
                path,
                format: asset.style.format,
                width: rendered_width(&code, &asset.style)?,
                bytes: contents.len(),
            };
            info!(
                path = %artifact.path.display(),
                format = %artifact.format,
                width = artifact.width,
                "QR code generated"
            );
            artifacts.push(artifact);
        }

        info!(
            count = artifacts.len(),
            output_dir = %self.output_dir.display(),
            "QR assets complete"
        );

        Ok(artifacts)
    }

    fn verify_raster(&self, file: &str, image: image::RgbImage) -> Result<()> {
        let decoded = QrDecoder::new().decode(&DynamicImage::ImageRgb8(image))?;
        if decoded.text != self.url {
            return Err(Error::Verification {
                file: file.to_string(),
                expected: self.url.clone(),
                actual: decoded.text,
            });
        }
        debug!(file, inverted = decoded.inverted, "Verified rendered QR code");
        Ok(())
    }
}

async fn write_artifact(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| Error::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    tokio::fs::write(path, contents)
        .await
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_assets_match_pitch_styles() {
        let assets = default_assets();
        assert_eq!(assets.len(), 3);

        assert_eq!(assets[0].style.width, 400);
        assert_eq!(assets[0].style.margin, 2);
        assert_eq!(assets[0].style.dark.as_str(), "#D86DCB");
        assert_eq!(assets[0].style.light.as_str(), "#0a0a0f");

        assert_eq!(assets[1].style.dark.as_str(), "#000000");
        assert_eq!(assets[1].style.light.as_str(), "#FFFFFF");

        assert_eq!(assets[2].style.format, OutputFormat::Svg);
        assert_eq!(assets[2].style.width, 200);
        assert_eq!(assets[2].style.margin, 1);
    }

    #[tokio::test]
    async fn writes_nested_asset_paths() {
        let dir = tempfile::tempdir().unwrap();
        let generator = AssetGenerator::new(
            "nested",
            dir.path().join("out"),
            vec![AssetSpec::new(
                "print/code.png",
                Style::print(OutputFormat::Png, 100, 1),
            )],
        );

        let artifacts = generator.generate().await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(dir.path().join("out/print/code.png").is_file());
    }

    #[tokio::test]
    async fn verification_passes_for_rendered_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let generator = AssetGenerator::new(
            "https://investor-pitch.onestrategy.app",
            dir.path(),
            default_assets(),
        )
        .with_verification(true);

        let artifacts = generator.generate().await.unwrap();
        assert_eq!(artifacts.len(), 3);
    }

    #[tokio::test]
    async fn oversized_style_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("assets");
        let asset = AssetSpec::new(
            "qr-code.png",
            Style::print(OutputFormat::Png, 400, u32::MAX / 2),
        );

        let config = AssetsConfig {
            output_dir: out.clone(),
            assets: vec![asset.clone()],
            ..AssetsConfig::default()
        };
        assert!(matches!(
            AssetGenerator::from_config(&config),
            Err(Error::Config(_))
        ));

        let result = AssetGenerator::new("bounded", &out, vec![asset]).generate().await;
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(!out.join("qr-code.png").exists());
    }

    #[tokio::test]
    async fn encoding_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("assets");
        let generator = AssetGenerator::new("x".repeat(8000), &out, default_assets());

        let result = generator.generate().await;
        assert!(matches!(result, Err(Error::QrEncode(_))));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }
}
