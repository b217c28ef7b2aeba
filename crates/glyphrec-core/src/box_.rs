//! Axis-aligned rectangles for glyph bounds and clip regions

use crate::error::{Error, Result};

/// Rectangle with top-left corner `(x, y)` covering `w` columns and `h` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Box {
    /// Validated constructor; negative extents are an [`Error::InvalidParameter`].
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box spanning the inclusive pixel range `min..=max` on both axes.
    pub fn from_extent(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            w: max_x - min_x + 1,
            h: max_y - min_y + 1,
        }
    }

    /// First column past the box.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// First row past the box.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// No pixels covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether the row ranges of the two boxes intersect.
    pub fn overlaps_vertically(&self, other: &Box) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    /// Clip this box to an image of the given size.
    ///
    /// Returns `None` when nothing of the box lies inside the image.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Box> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(width as i32);
        let y1 = self.bottom().min(height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Box::new_unchecked(x0, y0, x1 - x0, y1 - y0))
    }
}
