//! Depth conversion
//!
//! Conversions between binary, grayscale and color images.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::Result;

/// Luma weights used for color → gray conversion
pub const LUMA_WEIGHTS: (f32, f32, f32) = (0.299, 0.587, 0.114);

/// Convert any supported image to 8 bpp grayscale.
///
/// - 8 bpp is returned as a cheap clone
/// - 32 bpp uses [`LUMA_WEIGHTS`]
/// - 1 bpp maps foreground to black (0) and background to white (255)
pub fn convert_to_gray(pix: &Pix) -> Result<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 => Ok(pix.clone()),
        PixelDepth::Bit32 => convert_rgb_to_gray(pix),
        PixelDepth::Bit1 => {
            let data = pix
                .data()
                .iter()
                .map(|&v| if v != 0 { 0 } else { 255 })
                .collect();
            Pix::from_raw(pix.width(), pix.height(), PixelDepth::Bit8, data)
        }
    }
}

/// Convert a 32 bpp color image to 8 bpp grayscale with [`LUMA_WEIGHTS`].
pub fn convert_rgb_to_gray(pix: &Pix) -> Result<Pix> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(crate::Error::UnsupportedDepth(pix.depth().bits()));
    }
    let (wr, wg, wb) = LUMA_WEIGHTS;
    let data = pix
        .data()
        .iter()
        .map(|&p| {
            let (r, g, b) = color::extract_rgb(p);
            let v = wr * r as f32 + wg * g as f32 + wb * b as f32;
            (v + 0.5).min(255.0) as u32
        })
        .collect();
    Pix::from_raw(pix.width(), pix.height(), PixelDepth::Bit8, data)
}

/// Convert any supported image to 32 bpp RGB.
///
/// Gray values are replicated into the three channels; a 1 bpp mask is
/// first mapped through [`convert_to_gray`].
pub fn convert_to_rgb(pix: &Pix) -> Result<Pix> {
    let gray = match pix.depth() {
        PixelDepth::Bit32 => return Ok(pix.clone()),
        PixelDepth::Bit8 => pix.clone(),
        PixelDepth::Bit1 => convert_to_gray(pix)?,
    };
    let data = gray
        .data()
        .iter()
        .map(|&v| {
            let v = v as u8;
            color::compose_rgb(v, v, v)
        })
        .collect();
    Pix::from_raw(pix.width(), pix.height(), PixelDepth::Bit32, data)
}

/// Convert a 1 bpp mask to 8 bpp with foreground set to `fg_val` and
/// background to 0.
pub fn convert_binary_to_gray(pix: &Pix, fg_val: u8) -> Result<Pix> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(crate::Error::UnsupportedDepth(pix.depth().bits()));
    }
    let data = pix
        .data()
        .iter()
        .map(|&v| if v != 0 { fg_val as u32 } else { 0 })
        .collect();
    Pix::from_raw(pix.width(), pix.height(), PixelDepth::Bit8, data)
}
