//! Structuring elements
//!
//! A [`Sel`] is a rectangular grid of hit / miss cells with an origin.
//! Morphology places the origin on each pixel and looks at the pixels
//! under the hit cells.

use crate::{MorphError, MorphResult};

/// Rectangular structuring element with its origin at the center cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    hits: Vec<bool>,
}

impl Sel {
    fn blank(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "structuring element must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Sel {
            width,
            height,
            hits: vec![false; width as usize * height as usize],
        })
    }

    /// Solid `width` x `height` rectangle.
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::blank(width, height)?;
        sel.hits.fill(true);
        Ok(sel)
    }

    /// Solid `size` x `size` square.
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// One row of `length` hits.
    pub fn create_horizontal(length: u32) -> MorphResult<Self> {
        Self::create_brick(length, 1)
    }

    /// One column of `length` hits.
    pub fn create_vertical(length: u32) -> MorphResult<Self> {
        Self::create_brick(1, length)
    }

    /// Plus sign spanning the middle row and column of a `size` x `size` grid.
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        let mut sel = Self::blank(size, size)?;
        let mid = (size / 2) as usize;
        let n = size as usize;
        for i in 0..n {
            sel.hits[mid * n + i] = true;
            sel.hits[i * n + mid] = true;
        }
        Ok(sel)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Origin column (center, rounded down).
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.width / 2
    }

    /// Origin row (center, rounded down).
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.height / 2
    }

    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// True when every cell is a hit, so the separable brick path applies.
    pub fn is_brick(&self) -> bool {
        self.hits.iter().all(|&h| h)
    }

    /// `(dx, dy)` of every hit cell relative to the origin.
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (ox, oy) = (self.origin_x() as i32, self.origin_y() as i32);
        let w = self.width as usize;
        self.hits
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h)
            .map(move |(i, _)| ((i % w) as i32 - ox, (i / w) as i32 - oy))
    }
}
