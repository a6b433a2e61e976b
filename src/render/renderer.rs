//! Block drawing and the render entry point
//!
//! Walks the pattern's stitch blocks in stream order, classifies each one,
//! and draws it with the matching shading model. Later blocks paint over
//! earlier ones.

use crate::core::pattern::EmbPattern;
use crate::render::canvas::Canvas;
use crate::render::classify::{classify_block, BlockStyle, SatinColumn};
use crate::render::shading::{apply_shade, direction_gain, gradient_factor, satin_shade};
use crate::render::transform::prepare;
use crate::render::{parse_background, RenderSettings};
use crate::utils::error::{Error, Result};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Tatami rows alternate between these two shades
const TATAMI_SHADES: [f64; 2] = [0.92, 1.0];

/// Dot-product threshold marking a tatami row flip
const ROW_FLIP_DOT: f64 = -0.2;

/// Render a pattern to an RGBA image
///
/// The input pattern is copied; the caller's pattern keeps its original
/// coordinates.
pub fn render(pattern: &EmbPattern, settings: &RenderSettings) -> Result<RgbaImage> {
    // Fail on a bad background before any raster work
    let background = parse_background(settings.background.as_deref())?;

    let mut working = pattern.clone();
    let layout = prepare(&mut working, settings);
    let mut canvas = Canvas::new(layout.width, layout.height, background);
    let lw = layout.line_width;

    for (block, thread) in working.get_as_stitchblock() {
        if block.len() < 2 {
            continue;
        }
        let color = [thread.red(), thread.green(), thread.blue()];

        match classify_block(&block) {
            BlockStyle::Satin(columns) => {
                for column in &columns {
                    draw_satin_column(&mut canvas, column, color, lw);
                }
            }
            BlockStyle::Tatami => draw_tatami_block(&mut canvas, &block, color, lw),
            BlockStyle::Running => draw_running_block(&mut canvas, &block, color, lw),
        }
    }

    Ok(canvas.into_image())
}

/// Render a pattern straight to PNG bytes
pub fn render_png(pattern: &EmbPattern, settings: &RenderSettings) -> Result<Vec<u8>> {
    let image = render(pattern, settings)?;
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| Error::Render(e.to_string()))?;
    Ok(bytes)
}

/// Draw one satin column as stacked slices shading bright at the center
fn draw_satin_column(canvas: &mut Canvas, column: &SatinColumn, color: [u8; 3], lw: u32) {
    let ((lx, ly), (rx, ry)) = *column;
    let steps = (lw * 2).clamp(8, 24);

    for i in 0..steps {
        let t0 = i as f64 / steps as f64;
        let t1 = (i + 1) as f64 / steps as f64;
        let shaded = satin_shade(color, (t0 + t1) * 0.5);

        let x0 = lx + (rx - lx) * t0;
        let y0 = ly + (ry - ly) * t0;
        let x1 = lx + (rx - lx) * t1;
        let y1 = ly + (ry - ly) * t1;
        canvas.draw_line(x0, y0, x1, y1, shaded, lw);
    }
}

/// Draw a tatami block with rows alternating between two close shades
fn draw_tatami_block(canvas: &mut Canvas, points: &[(f64, f64)], color: [u8; 3], lw: u32) {
    let mut run_idx = 0usize;
    let mut last_dir: Option<(f64, f64)> = None;

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let dx = x1 - x0;
        let dy = y1 - y0;
        let mag = (dx * dx + dy * dy).sqrt();
        if mag == 0.0 {
            continue;
        }
        let dir = (dx / mag, dy / mag);
        if let Some((ldx, ldy)) = last_dir {
            if dir.0 * ldx + dir.1 * ldy < ROW_FLIP_DOT {
                run_idx ^= 1;
            }
        }
        last_dir = Some(dir);

        let shaded = apply_shade(color, TATAMI_SHADES[run_idx]);
        canvas.draw_line(x0, y0, x1, y1, shaded, lw);
    }
}

/// Draw a running-stitch block with the lengthwise gradient and
/// directional lighting
fn draw_running_block(canvas: &mut Canvas, points: &[(f64, f64)], color: [u8; 3], lw: u32) {
    let mut seg_lengths = Vec::with_capacity(points.len().saturating_sub(1));
    let mut total_len = 0.0;
    for pair in points.windows(2) {
        let dx = pair[1].0 - pair[0].0;
        let dy = pair[1].1 - pair[0].1;
        let dist = (dx * dx + dy * dy).sqrt();
        seg_lengths.push(dist);
        total_len += dist;
    }
    if total_len == 0.0 {
        return;
    }

    let mut cum = 0.0;
    for (pair, seg_len) in points.windows(2).zip(seg_lengths) {
        if seg_len == 0.0 {
            continue;
        }
        let t0 = cum / total_len;
        cum += seg_len;
        let t1 = cum / total_len;

        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        let base = gradient_factor((t0 + t1) * 0.5);
        let gain = direction_gain(x1 - x0, y1 - y0);
        let shade = (base * gain).clamp(0.2, 1.8);
        canvas.draw_line(x0, y0, x1, y1, apply_shade(color, shade), lw);
    }
}
