//! Runtime configuration handling
//!
//! Every field has a default, so running without a configuration file
//! produces the standard three assets for the pitch URL. Configuration is
//! only read from a file named on the command line.

use crate::assets::{AssetSpec, default_assets};
use crate::error::{Error, Result};
use crate::qr::parse_ecc_level;
use qrcode::EcLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// URL encoded when nothing else is configured; replaced once the site is deployed.
pub const PLACEHOLDER_URL: &str = "https://investor-pitch.onestrategy.app";

/// Directory assets are written to by default, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "assets";

/// Top-level configuration structure loaded from disk or environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Text encoded into every asset
    pub url: String,
    /// Directory receiving the generated files
    pub output_dir: PathBuf,
    /// Decode each rendered PNG before writing it
    pub verify: bool,
    /// Error correction level letter (L, M, Q, H)
    pub error_correction: String,
    /// Assets to generate, in order
    pub assets: Vec<AssetSpec>,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            url: PLACEHOLDER_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verify: false,
            error_correction: "M".to_string(),
            assets: default_assets(),
            logging: LoggingOptions::default(),
        }
    }
}

impl AssetsConfig {
    /// Resolve the run configuration.
    ///
    /// Without an explicit file the built-in defaults are used as-is: no file
    /// is discovered and no environment variable is consulted. With a file,
    /// `QRASSETS_*` variables are layered on top of it.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = match explicit_path {
            Some(path) => {
                let mut config = Self::from_file(path)?;
                config.apply_overrides(|key| env::var(key).ok());
                config
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply `QRASSETS_*` overrides using the given variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("QRASSETS_URL") {
            self.url = url;
        }
        if let Some(dir) = lookup("QRASSETS_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
        if let Some(verify) = lookup("QRASSETS_VERIFY").as_deref().and_then(parse_flag) {
            self.verify = verify;
        }
        if let Some(level) = lookup("QRASSETS_ERROR_CORRECTION") {
            self.error_correction = level;
        }
        self.logging.apply_overrides(&lookup);
    }

    /// Resolved error correction level
    pub fn ecc_level(&self) -> Result<EcLevel> {
        parse_ecc_level(&self.error_correction).ok_or_else(|| {
            Error::Config(format!(
                "Unknown error correction level '{}'. Use L, M, Q, or H",
                self.error_correction
            ))
        })
    }

    /// Reject configurations that cannot produce a sensible set of files.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::Config("url must not be empty".into()));
        }
        if self.assets.is_empty() {
            return Err(Error::Config("at least one asset must be configured".into()));
        }
        self.ecc_level()?;

        let mut seen = HashSet::new();
        for asset in &self.assets {
            let file = Path::new(&asset.file);
            let plain = file
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if asset.file.is_empty() || !plain {
                return Err(Error::Config(format!(
                    "asset file '{}' must be a relative path inside the output directory",
                    asset.file
                )));
            }
            if !seen.insert(asset.file.as_str()) {
                return Err(Error::Config(format!(
                    "asset file '{}' is listed more than once",
                    asset.file
                )));
            }
            asset.style.validate()?;
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRASSETS_LOG_LEVEL` when a config file is given)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("QRASSETS_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("QRASSETS_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("QRASSETS_LOG_COLOR").as_deref().and_then(parse_flag) {
            self.color = color;
        }
        if let Some(rotation) = lookup("QRASSETS_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
