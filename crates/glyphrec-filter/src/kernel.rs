//! Convolution kernels
//!
//! A [`Kernel`] is a small dense grid of weights with an origin. The
//! filters in this crate use Gaussian kernels, either as a separable 1-D
//! pair or restricted to a disk.

use crate::{FilterError, FilterResult};

/// Row-major grid of weights; the origin is the center cell
#[derive(Debug, Clone)]
pub struct Kernel {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Kernel {
    /// All-zero kernel. Both dimensions must be nonzero.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "empty kernel {width}x{height}"
            )));
        }
        Ok(Kernel {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    /// Kernel holding a copy of `data`, which must have `width * height` values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Sigma used for a Gaussian of `size` taps when none is given:
    /// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
    pub fn default_sigma(size: u32) -> f32 {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Horizontal `size` x 1 Gaussian whose weights sum to 1.
    ///
    /// A `sigma <= 0` selects [`Kernel::default_sigma`].
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even or 0.
    pub fn gaussian_1d(size: u32, sigma: f32) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian size must be odd, got {}",
                size
            )));
        }
        let sigma = if sigma > 0.0 { sigma } else { Self::default_sigma(size) };
        let mut kernel = Self::new(size, 1)?;
        let half = (size / 2) as i32;
        let denom = 2.0 * sigma * sigma;
        for (i, val) in kernel.data.iter_mut().enumerate() {
            let d = (i as i32 - half) as f32;
            *val = (-(d * d) / denom).exp();
        }
        kernel.normalize();
        Ok(kernel)
    }

    /// Square Gaussian weight grid masked to a disk of `diameter` pixels.
    ///
    /// Weights are `exp(-r^2 / (2 sigma^2))` inside the disk and 0 outside.
    /// They are not normalized; the bilateral filter normalizes per pixel.
    pub fn gaussian_disk(diameter: u32, sigma: f32) -> FilterResult<Self> {
        if sigma <= 0.0 {
            return Err(FilterError::InvalidParameters(
                "spatial sigma must be positive".to_string(),
            ));
        }
        let radius = (diameter.max(1) / 2) as i32;
        let size = (2 * radius + 1) as u32;
        let mut kernel = Self::new(size, size)?;
        let denom = 2.0 * sigma * sigma;
        for ky in -radius..=radius {
            for kx in -radius..=radius {
                let r2 = (kx * kx + ky * ky) as f32;
                if r2.sqrt() > radius as f32 {
                    continue;
                }
                kernel.set((kx + radius) as u32, (ky + radius) as u32, (-r2 / denom).exp());
            }
        }
        Ok(kernel)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width / 2
    }

    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height / 2
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Weight at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Out-of-grid writes are dropped.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Scale weights to sum to 1 (a zero-sum kernel is left alone).
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            self.data.iter_mut().for_each(|v| *v /= sum);
        }
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
