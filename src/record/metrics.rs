//! Stream metrics
//!
//! Bounding-box dimensions and command tallies computed over the raw stitch
//! stream. The area is derived from the unrounded dimensions before its own
//! rounding, so it can differ slightly from `width_mm * height_mm` of the
//! rounded values.

use crate::core::constants::*;
use crate::core::pattern::EmbPattern;

/// Design units per millimeter is 10 (1 unit = 0.1 mm)
pub const UNITS_TO_MM: f64 = 0.1;

/// Metrics computed over all triples of the stream
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StreamMetrics {
    /// Bounding-box width in millimeters, unrounded
    pub width_mm: f64,
    /// Bounding-box height in millimeters, unrounded
    pub height_mm: f64,
    /// Bounding-box area in square millimeters, 1 decimal
    pub area_mm2: f64,
    /// COLOR_CHANGE commands
    pub color_changes: usize,
    /// STOP commands (stream-derived; the record's `file_info.stops` is the
    /// block count instead)
    pub stops: usize,
    /// TRIM commands
    pub trims: usize,
    /// APPLIQUE commands
    pub appliques: usize,
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute metrics for a pattern
pub fn compute_metrics(pattern: &EmbPattern) -> StreamMetrics {
    if pattern.stitches().is_empty() {
        return StreamMetrics::default();
    }

    let (min_x, min_y, max_x, max_y) = pattern.bounds();
    let width_mm = (max_x - min_x) * UNITS_TO_MM;
    let height_mm = (max_y - min_y) * UNITS_TO_MM;

    StreamMetrics {
        width_mm,
        height_mm,
        area_mm2: round1(width_mm * height_mm),
        color_changes: pattern.count_command(COLOR_CHANGE),
        stops: pattern.count_command(STOP),
        trims: pattern.count_command(TRIM),
        appliques: pattern.count_command(APPLIQUE),
    }
}
