//! RGBA drawing canvas
//!
//! A thin raster layer over an `image::RgbaImage`: background fill, thick
//! strokes with rounded joins (a disc stamped along the line), and PNG
//! encoding. Stroke pixels are always fully opaque; later strokes paint
//! over earlier ones.

use crate::utils::error::{Error, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Drawing canvas for preview rendering
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with the background color
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            img: RgbaImage::from_pixel(width.max(1), height.max(1), background),
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Borrow the underlying image
    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// Consume the canvas, returning the image
    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Draw a stroked segment with rounded caps and joins
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, rgb: [u8; 3], width: u32) {
        let x0 = x0.round() as i64;
        let y0 = y0.round() as i64;
        let x1 = x1.round() as i64;
        let y1 = y1.round() as i64;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.stamp_disc(x, y, rgb, width);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill a disc of the stroke width centered on a pixel
    fn stamp_disc(&mut self, cx: i64, cy: i64, rgb: [u8; 3], width: u32) {
        let radius = width as f64 / 2.0;
        let r2 = radius * radius;
        let reach = radius.ceil() as i64;

        for oy in -reach..=reach {
            for ox in -reach..=reach {
                if (ox * ox + oy * oy) as f64 > r2 {
                    continue;
                }
                self.plot(cx + ox, cy + oy, rgb);
            }
        }
    }

    /// Set one pixel fully opaque, ignoring out-of-bounds coordinates
    fn plot(&mut self, x: i64, y: i64, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.img.width() as i64 || y >= self.img.height() as i64 {
            return;
        }
        self.img
            .put_pixel(x as u32, y as u32, Rgba([rgb[0], rgb[1], rgb[2], 255]));
    }

    /// Encode the canvas as PNG bytes
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.img
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| Error::Render(e.to_string()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_minimum_canvas_size() {
        let canvas = Canvas::new(0, 0, TRANSPARENT);
        assert_eq!(canvas.width(), 1);
        assert_eq!(canvas.height(), 1);
    }

    #[test]
    fn test_stroke_pixels_opaque() {
        let mut canvas = Canvas::new(20, 20, TRANSPARENT);
        canvas.draw_line(2.0, 2.0, 15.0, 15.0, [200, 10, 10], 2);

        let mut stroke = 0;
        for pixel in canvas.image().pixels() {
            match pixel.0[3] {
                0 => {}
                255 => stroke += 1,
                other => panic!("partially transparent stroke pixel: alpha {}", other),
            }
        }
        assert!(stroke > 0);
    }

    #[test]
    fn test_width_one_is_thin() {
        let mut canvas = Canvas::new(10, 10, TRANSPARENT);
        canvas.draw_line(0.0, 5.0, 9.0, 5.0, [0, 0, 0], 1);

        // A 1px horizontal stroke covers exactly one row
        let covered = canvas
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] == 255)
            .count();
        assert_eq!(covered, 10);
    }

    #[test]
    fn test_out_of_bounds_clipped() {
        let mut canvas = Canvas::new(4, 4, TRANSPARENT);
        canvas.draw_line(-10.0, -10.0, 20.0, 20.0, [1, 2, 3], 6);
        // Must not panic; some in-bounds pixels get painted
        assert!(canvas.image().pixels().any(|p| p.0[3] == 255));
    }

    #[test]
    fn test_later_strokes_overwrite() {
        let mut canvas = Canvas::new(10, 10, TRANSPARENT);
        canvas.draw_line(0.0, 5.0, 9.0, 5.0, [255, 0, 0], 1);
        canvas.draw_line(0.0, 5.0, 9.0, 5.0, [0, 0, 255], 1);
        assert_eq!(canvas.image().get_pixel(4, 5).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_png_signature() {
        let canvas = Canvas::new(8, 8, Rgba([10, 20, 30, 255]));
        let png = canvas.png_bytes().unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
