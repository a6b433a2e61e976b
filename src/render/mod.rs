// TrueView rendering - thread-look raster previews

//! TrueView preview rendering
//!
//! Renders a pattern into an RGBA PNG that approximates embroidered thread:
//! satin columns get a cross-column sheen, tatami fills get alternating row
//! shades, running stitches get a lengthwise gradient with directional
//! lighting.

use crate::core::thread::parse_color_string;
use crate::utils::error::{Error, Result};
use image::Rgba;

/// RGBA drawing canvas
pub mod canvas;

/// Stitch-run classification
pub mod classify;

/// Block drawing and the render entry point
pub mod renderer;

/// Thread shading primitives
pub mod shading;

/// Canvas layout and coordinate transform
pub mod transform;

pub use renderer::{render, render_png};
pub use transform::NATIVE_BASE_SCALE;

/// Preview rendering options
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Background color (`#RRGGBB`, `#AARRGGBB`, or a named color);
    /// `None` renders on transparency
    pub background: Option<String>,
    /// Base stroke width in pixels
    pub line_width: u32,
    /// Explicit scale; `None` fits to `max_size` (unless `native_size`)
    pub scale: Option<f64>,
    /// Margin around the design in pixels
    pub margin: u32,
    /// Maximum rendered dimension in pixels
    pub max_size: u32,
    /// Render at the native 0.35 baseline, scaling up small designs
    pub native_size: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: None,
            line_width: 2,
            scale: None,
            margin: 20,
            max_size: 1200,
            native_size: false,
        }
    }
}

impl RenderSettings {
    /// Defaults used for the preview embedded in a design record
    /// (tight margin, native sizing, capped at 800 px)
    pub fn embedded_preview() -> Self {
        Self {
            background: None,
            line_width: 2,
            scale: None,
            margin: 0,
            max_size: 800,
            native_size: true,
        }
    }
}

/// Parse a background specification into an RGBA pixel
///
/// Accepts `#RRGGBB` (opaque), `#AARRGGBB`, or a named color; `None` is
/// fully transparent.
pub fn parse_background(background: Option<&str>) -> Result<Rgba<u8>> {
    let Some(spec) = background else {
        return Ok(Rgba([0, 0, 0, 0]));
    };

    let hex = spec.strip_prefix('#').unwrap_or(spec);
    if hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let a = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|_| Error::InvalidColor(spec.to_string()))?;
        let r = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|_| Error::InvalidColor(spec.to_string()))?;
        let g = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|_| Error::InvalidColor(spec.to_string()))?;
        let b = u8::from_str_radix(&hex[6..8], 16)
            .map_err(|_| Error::InvalidColor(spec.to_string()))?;
        return Ok(Rgba([r, g, b, a]));
    }

    let rgb = parse_color_string(spec)?;
    Ok(Rgba([
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
        255,
    ]))
}
