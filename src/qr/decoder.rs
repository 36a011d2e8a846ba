//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::DecodedQr;
use image::{DynamicImage, GrayImage, imageops};

/// QR code decoder
#[derive(Debug, Default, Clone, Copy)]
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a QR code from an image.
    ///
    /// Light-on-dark codes are not found by the grid detector as-is, so a
    /// failed attempt is retried on the inverted image. The error from the
    /// first attempt is reported when both fail.
    pub fn decode(&self, img: &DynamicImage) -> Result<DecodedQr> {
        let gray = img.to_luma8();

        match self.decode_gray(&gray, false) {
            Ok(decoded) => Ok(decoded),
            Err(first) => {
                let mut inverted = gray;
                imageops::invert(&mut inverted);
                self.decode_gray(&inverted, true).map_err(|_| first)
            }
        }
    }

    /// Decode PNG (or any format `image` recognises) from memory.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<DecodedQr> {
        let img = image::load_from_memory(bytes)?;
        self.decode(&img)
    }

    fn decode_gray(&self, img: &GrayImage, inverted: bool) -> Result<DecodedQr> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());

        let grids = prepared.detect_grids();

        // Take the first detected QR code
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}, inverted={}",
                    meta.version,
                    meta.ecc_level,
                    content.len(),
                    inverted
                );

                Ok(DecodedQr {
                    text: content,
                    version: meta.version.0,
                    inverted,
                })
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrEncoder;
    use crate::qr::render::{png_bytes, render_png};
    use crate::style::{OutputFormat, Style};

    const URL: &str = "https://investor-pitch.onestrategy.app";

    #[test]
    fn test_decodes_dark_on_light() {
        let code = QrEncoder::new().encode(URL).unwrap();
        let image = render_png(&code, &Style::print(OutputFormat::Png, 400, 2)).unwrap();

        let decoded = QrDecoder::new()
            .decode(&DynamicImage::ImageRgb8(image))
            .unwrap();
        assert_eq!(decoded.as_str(), URL);
        assert_eq!(decoded.version, 3);
        assert!(!decoded.inverted);
    }

    #[test]
    fn test_decodes_light_on_dark() {
        let code = QrEncoder::new().encode(URL).unwrap();
        let image = render_png(&code, &Style::accent(OutputFormat::Png, 400, 2)).unwrap();
        let bytes = png_bytes(&image).unwrap();

        let decoded = QrDecoder::new().decode_bytes(&bytes).unwrap();
        assert_eq!(decoded.as_str(), URL);
    }

    #[test]
    fn test_blank_image_has_no_code() {
        let blank = GrayImage::from_pixel(200, 200, image::Luma([255]));
        let result = QrDecoder::new().decode(&DynamicImage::ImageLuma8(blank));
        assert!(matches!(result, Err(Error::NoQrCodeFound)));
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let result = QrDecoder::new().decode_bytes(b"not an image");
        assert!(matches!(result, Err(Error::Image(_))));
    }
}
