//! Styling parameters applied when rendering a QR code

use crate::error::{Error, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `#RGB` or `#RRGGBB` color.
///
/// The original spelling is preserved so SVG output carries the color exactly
/// as configured (e.g. `#D86DCB` stays upper-case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    raw: String,
    rgb: [u8; 3],
}

impl HexColor {
    /// Parse a hex color string.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(value.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(value.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| Error::InvalidColor(value.to_string()))
        };

        let rgb = match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    out[i] = v * 17;
                }
                out
            }
            6 => [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ],
            _ => return Err(Error::InvalidColor(value.to_string())),
        };

        Ok(Self {
            raw: trimmed.to_string(),
            rgb,
        })
    }

    fn known(raw: &str, rgb: [u8; 3]) -> Self {
        Self {
            raw: raw.to_string(),
            rgb,
        }
    }

    /// Color as an `image` RGB pixel
    pub fn to_rgb(&self) -> Rgb<u8> {
        Rgb(self.rgb)
    }

    /// Color as written in the configuration
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.raw
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Output encoding of a rendered asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Raster PNG image
    Png,
    /// SVG markup
    Svg,
}

impl OutputFormat {
    /// Conventional file extension for the format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Per-asset rendering parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Output format
    pub format: OutputFormat,
    /// Nominal image width (and height) in pixels
    pub width: u32,
    /// Quiet zone around the code, in modules
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Foreground (dark module) color
    pub dark: HexColor,
    /// Background (light module) color
    pub light: HexColor,
}

/// Largest accepted nominal width in pixels
pub const MAX_WIDTH: u32 = 8192;

/// Largest accepted quiet zone in modules
pub const MAX_MARGIN: u32 = 64;

fn default_margin() -> u32 {
    4
}

impl Style {
    /// Accent foreground on the dark site background.
    pub fn accent(format: OutputFormat, width: u32, margin: u32) -> Self {
        Self {
            format,
            width,
            margin,
            dark: HexColor::known("#D86DCB", [0xD8, 0x6D, 0xCB]),
            light: HexColor::known("#0a0a0f", [0x0a, 0x0a, 0x0f]),
        }
    }

    /// Plain black on white, for print.
    pub fn print(format: OutputFormat, width: u32, margin: u32) -> Self {
        Self {
            format,
            width,
            margin,
            dark: HexColor::known("#000000", [0x00, 0x00, 0x00]),
            light: HexColor::known("#FFFFFF", [0xFF, 0xFF, 0xFF]),
        }
    }

    /// Check parameters that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::Config("asset width must be greater than zero".into()));
        }
        if self.width > MAX_WIDTH {
            return Err(Error::Config(format!(
                "asset width {} exceeds the maximum of {MAX_WIDTH} pixels",
                self.width
            )));
        }
        if self.margin > MAX_MARGIN {
            return Err(Error::Config(format!(
                "asset margin {} exceeds the maximum of {MAX_MARGIN} modules",
                self.margin
            )));
        }
        Ok(())
    }
}
