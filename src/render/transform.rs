//! Canvas layout and coordinate transform
//!
//! Moves the design from pattern units into canvas pixel space. Three scale
//! modes: native (0.35 px/unit baseline, scaled up to fit small designs),
//! fit (fill the max size), or an explicit scale. Line width follows the
//! scale in native mode so the thread gauge stays believable.

use crate::core::pattern::EmbPattern;
use crate::render::RenderSettings;

/// Baseline scale for native-size rendering (pixels per design unit)
pub const NATIVE_BASE_SCALE: f64 = 0.35;

/// Resolved canvas geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Canvas width in pixels (>= 1)
    pub width: u32,
    /// Canvas height in pixels (>= 1)
    pub height: u32,
    /// Effective scale applied to the pattern
    pub scale: f64,
    /// Effective stroke width in pixels
    pub line_width: u32,
}

/// Resolve the effective scale for a design span
pub fn resolve_scale(settings: &RenderSettings, width: f64, height: f64) -> f64 {
    let span = width.max(height);
    let usable = (settings.max_size as f64 - 2.0 * settings.margin as f64).max(1.0);

    if settings.native_size {
        if span > 0.0 {
            NATIVE_BASE_SCALE.max(usable / span)
        } else {
            NATIVE_BASE_SCALE
        }
    } else if let Some(scale) = settings.scale {
        scale
    } else if span > 0.0 {
        usable / span
    } else {
        1.0
    }
}

/// Transform the pattern into canvas space and compute the layout
///
/// The pattern is remapped in place (callers pass their own copy): each
/// stitch moves to `((x - min_x) * scale + margin, (y - min_y) * scale +
/// margin)`.
pub fn prepare(pattern: &mut EmbPattern, settings: &RenderSettings) -> CanvasLayout {
    let (min_x, min_y, max_x, max_y) = pattern.bounds();
    let scale = resolve_scale(settings, max_x - min_x, max_y - min_y);
    let margin = settings.margin as f64;

    pattern.map_coordinates(|x, y| ((x - min_x) * scale + margin, (y - min_y) * scale + margin));

    let (new_min_x, new_min_y, new_max_x, new_max_y) = pattern.bounds();
    let width = ((new_max_x - new_min_x + 2.0 * margin + 2.0).ceil() as u32).max(1);
    let height = ((new_max_y - new_min_y + 2.0 * margin + 2.0).ceil() as u32).max(1);

    let line_width = if settings.native_size {
        let scaled = (settings.line_width as f64 * scale / NATIVE_BASE_SCALE).round() as u32;
        scaled.max(1)
    } else {
        settings.line_width
    };

    CanvasLayout {
        width,
        height,
        scale,
        line_width,
    }
}
