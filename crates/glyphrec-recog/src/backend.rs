//! Image-processing capabilities used by the pipeline
//!
//! The pipeline never calls the filter, morphology or region crates
//! directly; it goes through [`VisionBackend`], so tests can substitute a
//! backend with predictable behavior.

use crate::RecogResult;
use glyphrec_core::Pix;
use glyphrec_filter::{AdaptiveMethod, ThresholdType};
use glyphrec_morph::Sel;
use glyphrec_region::{Border, BorderPoint, ContourMode, ShapeMatchMethod};

/// Primitive operations the pipeline is built from
pub trait VisionBackend {
    /// Edge-preserving smoothing of an 8 bpp image
    fn smooth(&self, gray: &Pix, diameter: u32, sigma_color: f32, sigma_space: f32)
    -> RecogResult<Pix>;

    /// Inverted local threshold of an 8 bpp image: dark pixels become
    /// foreground of the returned 1 bpp mask
    fn adaptive_threshold(&self, gray: &Pix, block_size: u32, offset: f32) -> RecogResult<Pix>;

    /// Morphological opening of a 1 bpp mask
    fn morph_open(&self, mask: &Pix, sel: &Sel) -> RecogResult<Pix>;

    /// Morphological closing of a 1 bpp mask
    fn morph_close(&self, mask: &Pix, sel: &Sel) -> RecogResult<Pix>;

    /// Borders of a 1 bpp mask in discovery order
    fn find_contours(&self, mask: &Pix, mode: ContourMode) -> RecogResult<Vec<Border>>;

    /// Shape dissimilarity of two contours; 0 means same shape
    fn shape_distance(&self, a: &[BorderPoint], b: &[BorderPoint], method: ShapeMatchMethod)
    -> f64;
}

/// Backend built on the glyphrec image-processing crates
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl VisionBackend for NativeBackend {
    fn smooth(
        &self,
        gray: &Pix,
        diameter: u32,
        sigma_color: f32,
        sigma_space: f32,
    ) -> RecogResult<Pix> {
        Ok(glyphrec_filter::bilateral_gray(
            gray,
            diameter,
            sigma_color,
            sigma_space,
        )?)
    }

    fn adaptive_threshold(&self, gray: &Pix, block_size: u32, offset: f32) -> RecogResult<Pix> {
        Ok(glyphrec_filter::adaptive_threshold(
            gray,
            AdaptiveMethod::Gaussian,
            ThresholdType::BinaryInv,
            block_size,
            offset,
        )?)
    }

    fn morph_open(&self, mask: &Pix, sel: &Sel) -> RecogResult<Pix> {
        Ok(glyphrec_morph::open(mask, sel)?)
    }

    fn morph_close(&self, mask: &Pix, sel: &Sel) -> RecogResult<Pix> {
        Ok(glyphrec_morph::close(mask, sel)?)
    }

    fn find_contours(&self, mask: &Pix, mode: ContourMode) -> RecogResult<Vec<Border>> {
        Ok(glyphrec_region::find_contours(mask, mode)?)
    }

    fn shape_distance(
        &self,
        a: &[BorderPoint],
        b: &[BorderPoint],
        method: ShapeMatchMethod,
    ) -> f64 {
        glyphrec_region::match_shapes(a, b, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphrec_core::PixelDepth;

    #[test]
    fn test_native_threshold_marks_dark_pixels() {
        let mut data = vec![200u32; 15 * 15];
        data[7 * 15 + 7] = 10;
        let gray = Pix::from_raw(15, 15, PixelDepth::Bit8, data).unwrap();
        let mask = NativeBackend.adaptive_threshold(&gray, 11, 2.0).unwrap();
        assert_eq!(mask.depth(), PixelDepth::Bit1);
        assert_eq!(mask.get_pixel(7, 7), Some(1));
        assert_eq!(mask.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_native_shape_distance_identity() {
        let square = [
            BorderPoint::new(0, 0),
            BorderPoint::new(0, 5),
            BorderPoint::new(5, 5),
            BorderPoint::new(5, 0),
        ];
        let d = NativeBackend.shape_distance(&square, &square, ShapeMatchMethod::I1);
        assert!(d.abs() < 1e-12);
    }
}
