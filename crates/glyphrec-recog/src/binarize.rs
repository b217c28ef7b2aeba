//! Page binarization
//!
//! Turns a scanned page into a 1 bpp mask whose foreground is the ink of
//! the glyph strokes. The steps are fixed:
//!
//! 1. bilateral smoothing (removes paper texture, keeps stroke edges)
//! 2. inverted Gaussian adaptive threshold
//! 3. opening with a cross (drops specks)
//! 4. closing with a square (fills pin holes inside strokes)

use crate::backend::{NativeBackend, VisionBackend};
use crate::{RecogError, RecogResult};
use glyphrec_core::{Pix, PixelDepth, convert_rgb_to_gray};
use glyphrec_morph::Sel;

/// Parameters of the binarization steps
#[derive(Debug, Clone, PartialEq)]
pub struct BinarizeOptions {
    /// Bilateral filter diameter (default: 15)
    pub smooth_diameter: u32,
    /// Bilateral filter range sigma (default: 75.0)
    pub sigma_color: f32,
    /// Bilateral filter spatial sigma (default: 75.0)
    pub sigma_space: f32,
    /// Adaptive threshold neighborhood size (default: 11)
    pub block_size: u32,
    /// Constant subtracted from the local mean (default: 2.0)
    pub offset: f32,
    /// Size of the cross used for opening (default: 3)
    pub open_size: u32,
    /// Size of the square used for closing (default: 5)
    pub close_size: u32,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        Self {
            smooth_diameter: 15,
            sigma_color: 75.0,
            sigma_space: 75.0,
            block_size: 11,
            offset: 2.0,
            open_size: 3,
            close_size: 5,
        }
    }
}

impl BinarizeOptions {
    /// Set the bilateral smoothing parameters
    pub fn with_smoothing(mut self, diameter: u32, sigma_color: f32, sigma_space: f32) -> Self {
        self.smooth_diameter = diameter;
        self.sigma_color = sigma_color;
        self.sigma_space = sigma_space;
        self
    }

    /// Set the adaptive threshold parameters
    pub fn with_threshold(mut self, block_size: u32, offset: f32) -> Self {
        self.block_size = block_size;
        self.offset = offset;
        self
    }

    /// Set the opening and closing element sizes
    pub fn with_morphology(mut self, open_size: u32, close_size: u32) -> Self {
        self.open_size = open_size;
        self.close_size = close_size;
        self
    }
}

/// Binarize a page with the native backend.
///
/// See [`binarize_with`].
pub fn binarize(pix: &Pix, options: &BinarizeOptions) -> RecogResult<Pix> {
    binarize_with(&NativeBackend, pix, options)
}

/// Binarize a page.
///
/// # Arguments
/// * `backend` - Provider of the image-processing steps
/// * `pix` - 8 bpp grayscale or 32 bpp color page
/// * `options` - Step parameters
///
/// # Returns
/// A 1 bpp mask of the same size, foreground = ink.
///
/// # Errors
/// Returns [`RecogError::UnsupportedDepth`] for 1 bpp input.
pub fn binarize_with<B: VisionBackend + ?Sized>(
    backend: &B,
    pix: &Pix,
    options: &BinarizeOptions,
) -> RecogResult<Pix> {
    let gray = match pix.depth() {
        PixelDepth::Bit8 => pix.clone(),
        PixelDepth::Bit32 => convert_rgb_to_gray(pix)?,
        PixelDepth::Bit1 => {
            return Err(RecogError::UnsupportedDepth {
                expected: "8 or 32 bpp",
                actual: 1,
            });
        }
    };

    let smoothed = backend.smooth(
        &gray,
        options.smooth_diameter,
        options.sigma_color,
        options.sigma_space,
    )?;
    let thresholded = backend.adaptive_threshold(&smoothed, options.block_size, options.offset)?;
    let opened = backend.morph_open(&thresholded, &Sel::create_cross(options.open_size)?)?;
    let closed = backend.morph_close(&opened, &Sel::create_square(options.close_size)?)?;

    tracing::trace!(
        width = closed.width(),
        height = closed.height(),
        foreground = closed.count_pixels(),
        "binarized page"
    );
    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrec_core::color;

    fn page_with_bar() -> Pix {
        let (w, h) = (40u32, 30u32);
        let paper = color::compose_rgb(235, 235, 230);
        let ink = color::compose_rgb(15, 15, 20);
        let data = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                if (10..30).contains(&x) && (12..18).contains(&y) {
                    ink
                } else {
                    paper
                }
            })
            .collect();
        Pix::from_raw(w, h, PixelDepth::Bit32, data).unwrap()
    }

    #[test]
    fn test_binarize_color_page() {
        let mask = binarize(&page_with_bar(), &BinarizeOptions::default()).unwrap();
        assert_eq!(mask.depth(), PixelDepth::Bit1);
        assert_eq!((mask.width(), mask.height()), (40, 30));
        assert_eq!(mask.get_pixel(20, 15), Some(1));
        assert_eq!(mask.get_pixel(2, 2), Some(0));
        assert_eq!(mask.get_pixel(20, 25), Some(0));
    }

    #[test]
    fn test_binarize_rejects_binary_input() {
        let pix = Pix::new(10, 10, PixelDepth::Bit1).unwrap();
        assert!(matches!(
            binarize(&pix, &BinarizeOptions::default()),
            Err(RecogError::UnsupportedDepth { actual: 1, .. })
        ));
    }

    #[test]
    fn test_options_builders() {
        let opts = BinarizeOptions::default()
            .with_smoothing(9, 50.0, 40.0)
            .with_threshold(15, 4.0)
            .with_morphology(1, 3);
        assert_eq!(opts.smooth_diameter, 9);
        assert_eq!(opts.block_size, 15);
        assert_eq!(opts.offset, 4.0);
        assert_eq!(opts.close_size, 3);
    }
}
