//! Rendering of encoded QR codes into PNG rasters and SVG markup

use crate::error::{Error, Result};
use crate::style::{OutputFormat, Style};
use image::{ImageFormat, Rgb, RgbImage};
use qrcode::render::{Pixel, Renderer, svg};
use qrcode::{Color, QrCode};
use std::io::Cursor;

/// Modules across the rendered code, quiet zone included.
fn module_span(code: &QrCode, style: &Style) -> Result<u32> {
    u32::try_from(code.width())
        .ok()
        .and_then(|modules| style.margin.checked_mul(2)?.checked_add(modules))
        .ok_or_else(|| Error::Config(format!("margin {} is too large", style.margin)))
}

/// Side length in pixels of a rendered code.
///
/// PNG modules are whole pixels, so the nominal width is rounded down to a
/// multiple of `modules + 2 * margin` (never below one pixel per module).
/// SVG output is scalable and keeps the nominal width.
pub fn rendered_width(code: &QrCode, style: &Style) -> Result<u32> {
    let span = module_span(code, style)?;
    match style.format {
        OutputFormat::Png => (style.width / span)
            .max(1)
            .checked_mul(span)
            .ok_or_else(|| Error::Config(format!("width {} is too large", style.width))),
        OutputFormat::Svg => Ok(style.width),
    }
}

fn renderer<'a, P: Pixel>(colors: &'a [Color], code: &QrCode, style: &Style) -> Renderer<'a, P> {
    let mut renderer = Renderer::<P>::new(colors, code.width(), style.margin);
    renderer.quiet_zone(style.margin > 0);
    renderer
}

/// Render the code as an RGB raster using the style's colors and margin.
pub fn render_png(code: &QrCode, style: &Style) -> Result<RgbImage> {
    style.validate()?;
    let side = rendered_width(code, style)?;
    let colors = code.to_colors();
    Ok(renderer::<Rgb<u8>>(&colors, code, style)
        .max_dimensions(side, side)
        .dark_color(style.dark.to_rgb())
        .light_color(style.light.to_rgb())
        .build())
}

/// Render the code as a standalone SVG document.
///
/// The view box is measured in modules; the `width`/`height` attributes carry
/// the nominal size.
pub fn render_svg(code: &QrCode, style: &Style) -> Result<String> {
    style.validate()?;
    let span = module_span(code, style)?;
    let colors = code.to_colors();
    let svg = renderer::<svg::Color<'_>>(&colors, code, style)
        .module_dimensions(1, 1)
        .dark_color(svg::Color(style.dark.as_str()))
        .light_color(svg::Color(style.light.as_str()))
        .build();

    // The first occurrence is the root element; the background rect keeps module units.
    Ok(svg.replacen(
        &format!(r#"width="{span}" height="{span}""#),
        &format!(r#"width="{w}" height="{w}""#, w = style.width),
        1,
    ))
}

/// Encode a raster as PNG bytes.
pub fn png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
