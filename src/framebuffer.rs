//! RGBA pixel buffer backing native canvases.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Tightly packed, row-major RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Each pixel is 4 bytes: [R, G, B, A].
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a transparent framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "framebuffer dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel bytes, ready for PNG encoding.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fill the whole buffer with one color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Color at a pixel, `None` when out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Overwrite a pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Composite a color over a pixel. Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(dst) = self.get_pixel(x, y) {
            self.set_pixel(x, y, color.over(dst));
        }
    }

    /// Composite a color over every pixel of `rect`, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Composite an outline of `line_width` pixels just inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba, line_width: u32) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let lw = line_width.max(1);
        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = x < x0 + lw || x + lw >= x1 || y < y0 + lw || y + lw >= y1;
                if on_edge {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw a horizontal line `y` from `x0` to `x1` (exclusive).
    pub fn hline(&mut self, x0: u32, x1: u32, y: u32, color: Rgba) {
        for x in x0..x1.min(self.width) {
            self.blend_pixel(x, y, color);
        }
    }

    /// True when every pixel equals `color`.
    #[must_use]
    pub fn is_uniform(&self, color: Rgba) -> bool {
        let rgba = color.to_array();
        self.pixels.chunks_exact(4).all(|p| p == rgba)
    }

    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        if rect.is_empty() {
            return None;
        }
        let (x, y, w, h) = rect.to_pixels();
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        (x < x1 && y < y1).then_some((x, y, x1, y1))
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| ((y as usize) * (self.width as usize) + x as usize) * 4)
    }
}
