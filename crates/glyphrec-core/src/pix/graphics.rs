//! Rendering boxes onto images
//!
//! Used to annotate recognized glyphs on a copy of the input page.

use super::{PixMut, PixelDepth};
use crate::Box;
use crate::color;
use crate::error::{Error, Result};

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl PixMut {
    /// Render the outline of a box with a specific color (32 bpp only).
    ///
    /// The outline has the corners `(x, y)` and `(x + w, y + h)` and is
    /// `width` pixels thick, centered on the box edges. Parts that fall
    /// outside the image are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    pub fn render_box_color(&mut self, b: &Box, width: u32, c: Color) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let val = color::compose_rgb(c.r, c.g, c.b);
        let width = width.max(1) as i32;
        let lo = -(width / 2);
        let hi = lo + width;

        let (x0, y0, x1, y1) = (b.x, b.y, b.x + b.w, b.y + b.h);
        for t in lo..hi {
            for x in (x0 + lo)..(x1 + hi) {
                self.put_clipped(x, y0 + t, val);
                self.put_clipped(x, y1 + t, val);
            }
            for y in (y0 + lo)..(y1 + hi) {
                self.put_clipped(x0 + t, y, val);
                self.put_clipped(x1 + t, y, val);
            }
        }
        Ok(())
    }

    #[inline]
    fn put_clipped(&mut self, x: i32, y: i32, val: u32) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }
}
