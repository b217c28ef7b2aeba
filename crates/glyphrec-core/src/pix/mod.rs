//! Image container shared by every glyphrec crate
//!
//! A `Pix` holds a binary mask, a grayscale page or a color page.
//!
//! # Pixel layout
//!
//! - One `u32` per pixel, rows stored top to bottom
//! - 1 bpp: 0 = background, 1 = foreground
//! - 8 bpp: gray value 0..=255
//! - 32 bpp: `0xRRGGBBAA` (red in MSB)
//!
//! # Ownership model
//!
//! Clones of a `Pix` share one buffer. Writes go through a `PixMut`,
//! taken with [`Pix::try_into_mut`] (no copy when unshared) or
//! [`Pix::to_mut`] (always copies), and turned back with `Into<Pix>`.

mod access;
mod clip;
pub mod convert;
pub mod graphics;

pub use graphics::Color;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Supported bits per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary mask
    Bit1 = 1,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB(A)
    Bit32 = 32,
}

impl PixelDepth {
    /// Depth for a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1, 8, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Largest value a pixel of this depth can hold.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Shared pixel buffer
#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    data: Vec<u32>,
}

/// Immutable, cheaply cloned image
///
/// # Examples
///
/// ```
/// use glyphrec_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

/// Mutable image, obtained from [`Pix::to_mut`] or [`Pix::try_into_mut`]
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl Pix {
    /// All-zero image of the given size and depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize;
        Self::from_raw(width, height, depth, vec![0; len])
    }

    /// Image from row-major pixel values.
    ///
    /// Values are masked to the depth's range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, depth: PixelDepth, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let max = depth.max_value();
        let data = data.into_iter().map(|v| v & max).collect();
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                data,
            }),
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Row-major pixel values.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get one row of pixel values.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// All-zero image shaped like this one.
    pub fn create_template(&self) -> Self {
        let mut blank = self.to_mut();
        blank.set_all(0);
        blank.into()
    }

    /// Whether both images share width, height and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        (self.width(), self.height(), self.depth()) == (other.width(), other.height(), other.depth())
    }

    /// Convert into a mutable image without copying if this is the only reference.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if other references exist.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Pix> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Ok(PixMut { inner }),
            Err(inner) => Err(Pix { inner }),
        }
    }

    /// Create a mutable deep copy.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Create an independent copy of the image data.
    pub fn deep_clone(&self) -> Pix {
        self.to_mut().into()
    }

    /// Count pixels with a nonzero value.
    ///
    /// For a binary mask this is the number of foreground pixels.
    pub fn count_pixels(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }
}

impl PixMut {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Row-major pixel values.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Mutable row-major pixel values.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Set every pixel to `val` (masked to the depth's range).
    pub fn set_all(&mut self, val: u32) {
        let val = val & self.inner.depth.max_value();
        self.inner.data.iter_mut().for_each(|p| *p = val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimension() {
        assert!(Pix::new(0, 10, PixelDepth::Bit8).is_err());
        assert!(Pix::new(10, 0, PixelDepth::Bit1).is_err());
    }

    #[test]
    fn test_from_raw_masks_values() {
        let pix = Pix::from_raw(2, 1, PixelDepth::Bit1, vec![3, 0]).unwrap();
        assert_eq!(pix.data(), &[1, 0]);
        assert!(Pix::from_raw(2, 2, PixelDepth::Bit8, vec![0; 3]).is_err());
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let other = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(other);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_is_independent() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        let mut pm = pix.to_mut();
        pm.set_all(200);
        let modified: Pix = pm.into();
        assert_eq!(pix.count_pixels(), 0);
        assert_eq!(modified.count_pixels(), 9);
        assert_eq!(modified.row_data(1), &[200, 200, 200]);
    }

    #[test]
    fn test_depth_from_bits() {
        assert_eq!(PixelDepth::from_bits(8).unwrap(), PixelDepth::Bit8);
        assert!(PixelDepth::from_bits(4).is_err());
        assert_eq!(PixelDepth::Bit1.max_value(), 1);
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
    }
}
