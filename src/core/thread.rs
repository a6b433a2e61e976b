//! Thread color management and color utilities
//!
//! Provides the `EmbThread` type for representing thread colors with RGB values,
//! catalog numbers, and chart metadata, plus hex/named color parsing helpers.

use crate::utils::error::{Error, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Embroidery thread with color and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbThread {
    /// Thread color in RGB format (0xRRGGBB)
    pub color: u32,

    /// Thread description/name
    pub description: Option<String>,

    /// Catalog/ID number (e.g. "1234-5678")
    pub catalog_number: Option<String>,

    /// Brand/manufacturer; the preferred chart label
    pub brand: Option<String>,

    /// Chart reference; labels the chart when no brand is set
    pub chart: Option<String>,
}

impl EmbThread {
    /// Create a new thread with a given color
    pub fn new(color: u32) -> Self {
        Self {
            color: color & 0xFFFFFF,
            description: None,
            catalog_number: None,
            brand: None,
            chart: None,
        }
    }

    /// Create a thread from a color string (hex or named color)
    pub fn from_string(color_str: &str) -> Result<Self> {
        let color = parse_color_string(color_str)?;
        Ok(Self::new(color))
    }

    /// Create a thread from RGB values
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(color_rgb(r, g, b))
    }

    /// Get color as uppercase hex string (`#RRGGBB`)
    pub fn hex_color(&self) -> String {
        format!("#{:06X}", self.color)
    }

    /// Get red component (0-255)
    pub fn red(&self) -> u8 {
        ((self.color >> 16) & 0xFF) as u8
    }

    /// Get green component (0-255)
    pub fn green(&self) -> u8 {
        ((self.color >> 8) & 0xFF) as u8
    }

    /// Get blue component (0-255)
    pub fn blue(&self) -> u8 {
        (self.color & 0xFF) as u8
    }

    /// Builder method: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder method: set catalog number
    pub fn with_catalog_number(mut self, catalog: impl Into<String>) -> Self {
        self.catalog_number = Some(catalog.into());
        self
    }

    /// Builder method: set brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Builder method: set chart
    pub fn with_chart(mut self, chart: impl Into<String>) -> Self {
        self.chart = Some(chart.into());
        self
    }
}

impl Default for EmbThread {
    fn default() -> Self {
        Self::new(0x000000)
    }
}

impl PartialEq for EmbThread {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for EmbThread {}

impl std::fmt::Display for EmbThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref desc) = self.description {
            write!(f, "EmbThread {} {}", desc, self.hex_color())
        } else {
            write!(f, "EmbThread {}", self.hex_color())
        }
    }
}

// Color utility functions

/// Convert RGB components to a single u32 color value
pub fn color_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Format a packed RGB integer as uppercase `#RRGGBB`
pub fn rgb_to_hex(rgb: u32) -> String {
    format!("#{:06X}", rgb & 0xFFFFFF)
}

/// Parse hex color string (with or without #), 6 or 3 digits
pub fn parse_color_hex(hex_string: &str) -> Result<u32> {
    let h = hex_string.trim_start_matches('#');

    match h.len() {
        6 | 8 => u32::from_str_radix(&h[..6], 16)
            .map_err(|_| Error::InvalidColor(format!("Invalid hex color: {}", hex_string))),
        3 => {
            let chars: Vec<char> = h.chars().collect();
            let expanded = format!(
                "{}{}{}{}{}{}",
                chars[0], chars[0], chars[1], chars[1], chars[2], chars[2]
            );
            u32::from_str_radix(&expanded, 16)
                .map_err(|_| Error::InvalidColor(format!("Invalid hex color: {}", hex_string)))
        }
        _ => Err(Error::InvalidColor(format!(
            "Invalid hex color length: {}",
            hex_string
        ))),
    }
}

/// Parse a color string (hex or named color)
pub fn parse_color_string(color: &str) -> Result<u32> {
    if color.starts_with('#') {
        return parse_color_hex(color);
    }

    // Bare hex digits (3 or 6) before trying a name
    if (color.len() == 3 || color.len() == 6) && color.chars().all(|c| c.is_ascii_hexdigit()) {
        return parse_color_hex(color);
    }

    NAMED_COLORS
        .get(color.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| Error::InvalidColor(format!("Unknown color name: {}", color)))
}

// Common CSS/SVG named colors
lazy_static! {
    static ref NAMED_COLORS: HashMap<&'static str, u32> = {
        let mut m = HashMap::new();
        m.insert("black", color_rgb(0, 0, 0));
        m.insert("white", color_rgb(255, 255, 255));
        m.insert("red", color_rgb(255, 0, 0));
        m.insert("green", color_rgb(0, 128, 0));
        m.insert("lime", color_rgb(0, 255, 0));
        m.insert("blue", color_rgb(0, 0, 255));
        m.insert("navy", color_rgb(0, 0, 128));
        m.insert("yellow", color_rgb(255, 255, 0));
        m.insert("gold", color_rgb(255, 215, 0));
        m.insert("orange", color_rgb(255, 165, 0));
        m.insert("purple", color_rgb(128, 0, 128));
        m.insert("violet", color_rgb(238, 130, 238));
        m.insert("magenta", color_rgb(255, 0, 255));
        m.insert("fuchsia", color_rgb(255, 0, 255));
        m.insert("cyan", color_rgb(0, 255, 255));
        m.insert("aqua", color_rgb(0, 255, 255));
        m.insert("teal", color_rgb(0, 128, 128));
        m.insert("pink", color_rgb(255, 192, 203));
        m.insert("brown", color_rgb(165, 42, 42));
        m.insert("maroon", color_rgb(128, 0, 0));
        m.insert("olive", color_rgb(128, 128, 0));
        m.insert("gray", color_rgb(128, 128, 128));
        m.insert("grey", color_rgb(128, 128, 128));
        m.insert("silver", color_rgb(192, 192, 192));
        m.insert("beige", color_rgb(245, 245, 220));
        m.insert("ivory", color_rgb(255, 255, 240));
        m.insert("khaki", color_rgb(240, 230, 140));
        m.insert("coral", color_rgb(255, 127, 80));
        m.insert("salmon", color_rgb(250, 128, 114));
        m.insert("crimson", color_rgb(220, 20, 60));
        m.insert("indigo", color_rgb(75, 0, 130));
        m.insert("turquoise", color_rgb(64, 224, 208));
        m.insert("lavender", color_rgb(230, 230, 250));
        m.insert("tan", color_rgb(210, 180, 140));
        m
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_components() {
        let thread = EmbThread::new(0x12C3F4);
        assert_eq!(thread.red(), 0x12);
        assert_eq!(thread.green(), 0xC3);
        assert_eq!(thread.blue(), 0xF4);
        assert_eq!(thread.hex_color(), "#12C3F4");
    }

    #[test]
    fn test_color_masks_alpha() {
        let thread = EmbThread::new(0xFF123456);
        assert_eq!(thread.color, 0x123456);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color_hex("#FF0000").unwrap(), 0xFF0000);
        assert_eq!(parse_color_hex("00ff00").unwrap(), 0x00FF00);
        assert_eq!(parse_color_hex("#abc").unwrap(), 0xAABBCC);
        assert!(parse_color_hex("#12345").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color_string("red").unwrap(), 0xFF0000);
        assert_eq!(parse_color_string("Gold").unwrap(), 0xFFD700);
        assert!(parse_color_string("notacolor").is_err());
    }

    #[test]
    fn test_rgb_to_hex_uppercase() {
        assert_eq!(rgb_to_hex(0xab12cd), "#AB12CD");
        assert_eq!(rgb_to_hex(0), "#000000");
    }

    #[test]
    fn test_builder_metadata() {
        let thread = EmbThread::from_rgb(10, 20, 30)
            .with_catalog_number("512-7")
            .with_description("Slate")
            .with_brand("Metro Pro")
            .with_chart("Metro Pro");
        assert_eq!(thread.catalog_number.as_deref(), Some("512-7"));
        assert_eq!(thread.brand.as_deref(), Some("Metro Pro"));
    }
}
