//! Adaptive (local-mean) thresholding
//!
//! Each pixel is compared against a weighted mean of its
//! `block_size` x `block_size` neighborhood minus a constant offset, which
//! copes with uneven lighting across a scanned page.

use crate::{FilterError, FilterResult, Kernel};
use glyphrec_core::{Pix, PixelDepth};

/// How the local mean is weighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdaptiveMethod {
    /// Plain average of the block
    Mean,
    /// Gaussian-weighted average with [`Kernel::default_sigma`]
    #[default]
    Gaussian,
}

/// Which side of the threshold becomes foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdType {
    /// Foreground where `value > mean - offset`
    Binary,
    /// Foreground where `value <= mean - offset` (dark strokes on light paper)
    #[default]
    BinaryInv,
}

/// Compute the rounded local mean of an 8 bpp image.
///
/// Pixels outside the image repeat the nearest edge pixel.
pub fn local_mean(pix: &Pix, method: AdaptiveMethod, block_size: u32) -> FilterResult<Pix> {
    check_gray(pix)?;
    check_block_size(block_size)?;

    let taps = match method {
        AdaptiveMethod::Gaussian => Kernel::gaussian_1d(block_size, 0.0)?,
        AdaptiveMethod::Mean => {
            let v = 1.0 / block_size as f32;
            Kernel::from_slice(block_size, 1, &vec![v; block_size as usize])?
        }
    };
    let half = taps.center_x() as i32;
    let weights = taps.data();

    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let src = pix.data();

    // Horizontal pass into floats, then vertical pass with rounding.
    let mut tmp = vec![0.0f32; src.len()];
    for y in 0..h {
        let row = &src[(y * w) as usize..((y + 1) * w) as usize];
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &wk) in weights.iter().enumerate() {
                let sx = (x + k as i32 - half).clamp(0, w - 1);
                acc += wk * row[sx as usize] as f32;
            }
            tmp[(y * w + x) as usize] = acc;
        }
    }

    let mut out = pix.create_template().to_mut();
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &wk) in weights.iter().enumerate() {
                let sy = (y + k as i32 - half).clamp(0, h - 1);
                acc += wk * tmp[(sy * w + x) as usize];
            }
            dst[(y * w + x) as usize] = acc.round().clamp(0.0, 255.0) as u32;
        }
    }
    Ok(out.into())
}

/// Threshold an 8 bpp image against its local mean.
///
/// # Arguments
/// * `pix` - Input 8 bpp image
/// * `method` - Weighting of the local mean
/// * `ttype` - Which side of the threshold is foreground
/// * `block_size` - Odd neighborhood size, at least 3
/// * `offset` - Constant subtracted from the mean
///
/// # Returns
/// A 1 bpp mask of the same size.
pub fn adaptive_threshold(
    pix: &Pix,
    method: AdaptiveMethod,
    ttype: ThresholdType,
    block_size: u32,
    offset: f32,
) -> FilterResult<Pix> {
    let mean = local_mean(pix, method, block_size)?;
    let delta = match ttype {
        ThresholdType::Binary => offset.ceil() as i32,
        ThresholdType::BinaryInv => offset.floor() as i32,
    };

    let data = pix
        .data()
        .iter()
        .zip(mean.data())
        .map(|(&v, &m)| {
            let diff = v as i32 - m as i32;
            let fg = match ttype {
                ThresholdType::Binary => diff > -delta,
                ThresholdType::BinaryInv => diff <= -delta,
            };
            u32::from(fg)
        })
        .collect();
    Ok(Pix::from_raw(pix.width(), pix.height(), PixelDepth::Bit1, data)?)
}

fn check_gray(pix: &Pix) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bpp grayscale",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

fn check_block_size(block_size: u32) -> FilterResult<()> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "block size must be odd and >= 3, got {}",
            block_size
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot_on_paper() -> Pix {
        let mut data = vec![200u32; 15 * 15];
        data[7 * 15 + 7] = 10;
        Pix::from_raw(15, 15, PixelDepth::Bit8, data).unwrap()
    }

    #[test]
    fn test_uniform_has_no_foreground() {
        let pix = Pix::from_raw(12, 12, PixelDepth::Bit8, vec![90; 144]).unwrap();
        let mask = adaptive_threshold(
            &pix,
            AdaptiveMethod::Gaussian,
            ThresholdType::BinaryInv,
            11,
            2.0,
        )
        .unwrap();
        assert_eq!(mask.depth(), PixelDepth::Bit1);
        assert_eq!(mask.count_pixels(), 0);
    }

    #[test]
    fn test_dark_dot_is_foreground() {
        let mask = adaptive_threshold(
            &dot_on_paper(),
            AdaptiveMethod::Gaussian,
            ThresholdType::BinaryInv,
            11,
            2.0,
        )
        .unwrap();
        assert_eq!(mask.count_pixels(), 1);
        assert_eq!(mask.get_pixel(7, 7), Some(1));
    }

    #[test]
    fn test_binary_is_complement_for_integer_offset() {
        let pix = dot_on_paper();
        let inv = adaptive_threshold(&pix, AdaptiveMethod::Mean, ThresholdType::BinaryInv, 5, 2.0)
            .unwrap();
        let pos = adaptive_threshold(&pix, AdaptiveMethod::Mean, ThresholdType::Binary, 5, 2.0)
            .unwrap();
        assert_eq!(inv.count_pixels() + pos.count_pixels(), 225);
    }

    #[test]
    fn test_block_size_validation() {
        let pix = dot_on_paper();
        assert!(local_mean(&pix, AdaptiveMethod::Gaussian, 10).is_err());
        assert!(local_mean(&pix, AdaptiveMethod::Mean, 1).is_err());
    }
}
