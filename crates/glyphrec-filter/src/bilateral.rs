//! Edge-preserving smoothing
//!
//! Each output pixel is a weighted mean over a disk, where the weight is
//! the product of a distance Gaussian and an intensity-difference
//! Gaussian. Paper noise is averaged away while ink edges stay sharp.
//!
//! # Example
//!
//! ```ignore
//! use glyphrec_filter::bilateral_gray;
//!
//! let smoothed = bilateral_gray(&gray, 15, 75.0, 75.0)?;
//! ```

use crate::{FilterError, FilterResult, Kernel};
use glyphrec_core::{Pix, PixelDepth};

/// Weight per absolute gray difference `0..=255` for a range Gaussian of
/// standard deviation `range_stdev` (> 0).
pub fn make_range_kernel(range_stdev: f32) -> FilterResult<[f32; 256]> {
    if range_stdev <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "range_stdev must be positive".to_string(),
        ));
    }

    let mut kernel = [0.0f32; 256];
    let denom = 2.0 * range_stdev * range_stdev;

    for (i, val) in kernel.iter_mut().enumerate() {
        *val = (-(i as f32 * i as f32) / denom).exp();
    }

    Ok(kernel)
}

/// Mirror an out-of-range coordinate back into `0..n` without repeating
/// the edge pixel (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub(crate) fn reflect_101(mut i: i32, n: i32) -> i32 {
    if n <= 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i;
        }
    }
}

/// Apply a bilateral filter to an 8 bpp grayscale image.
///
/// # Arguments
/// * `pix` - Input 8 bpp image
/// * `diameter` - Diameter of the pixel neighborhood; the window is the
///   disk of radius `diameter / 2`
/// * `sigma_color` - Standard deviation of the range Gaussian
/// * `sigma_space` - Standard deviation of the spatial Gaussian
///
/// Pixels outside the image are mirrored (edge pixel not repeated).
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedDepth`] for non-8 bpp input and
/// [`FilterError::InvalidParameters`] for non-positive sigmas.
pub fn bilateral_gray(
    pix: &Pix,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> FilterResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    let spatial = Kernel::gaussian_disk(diameter, sigma_space)?;
    let range = make_range_kernel(sigma_color)?;

    // Only the taps inside the disk take part.
    let (kcx, kcy) = (spatial.center_x() as i32, spatial.center_y() as i32);
    let mut taps = Vec::new();
    for ky in 0..spatial.height() {
        for kx in 0..spatial.width() {
            let wgt = spatial.get(kx, ky).unwrap_or(0.0);
            if wgt > 0.0 {
                taps.push((kx as i32 - kcx, ky as i32 - kcy, wgt));
            }
        }
    }

    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let src = pix.data();
    let mut out = pix.create_template().to_mut();
    let dst = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let center = src[(y * w + x) as usize] as i32;
            let mut sum = 0.0f32;
            let mut weight_sum = 0.0f32;
            for &(dx, dy, spatial_weight) in &taps {
                let sx = reflect_101(x + dx, w);
                let sy = reflect_101(y + dy, h);
                let val = src[(sy * w + sx) as usize] as i32;
                let weight = spatial_weight * range[(center - val).unsigned_abs() as usize];
                sum += val as f32 * weight;
                weight_sum += weight;
            }
            dst[(y * w + x) as usize] = if weight_sum > 0.0 {
                (sum / weight_sum).round().clamp(0.0, 255.0) as u32
            } else {
                center as u32
            };
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-3, 5), 3);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-9, 3), 1);
        assert_eq!(reflect_101(4, 1), 0);
    }

    #[test]
    fn test_range_kernel() {
        let k = make_range_kernel(75.0).unwrap();
        assert_eq!(k[0], 1.0);
        assert!(k[255] < k[100]);
        assert!(make_range_kernel(0.0).is_err());
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let pix = Pix::from_raw(9, 9, PixelDepth::Bit8, vec![131; 81]).unwrap();
        let out = bilateral_gray(&pix, 15, 75.0, 75.0).unwrap();
        assert!(out.data().iter().all(|&v| v == 131));
    }

    #[test]
    fn test_rejects_binary() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(bilateral_gray(&pix, 15, 75.0, 75.0).is_err());
    }
}
