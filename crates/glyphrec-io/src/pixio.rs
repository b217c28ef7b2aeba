//! Conversion between `image` buffers and `Pix`
//!
//! Decoding and encoding of the actual file formats is delegated to the
//! `image` crate; this module only maps pixel layouts.

use crate::{IoError, IoResult};
use glyphrec_core::{Pix, PixelDepth, color};
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// Read an image file into a `Pix`.
///
/// Grayscale files become 8 bpp images; everything else (including
/// palette and alpha images) becomes 32 bpp RGB. Alpha is discarded.
///
/// # Errors
///
/// Returns [`IoError::Image`] if the file cannot be opened or decoded.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let img = image::open(path)?;
    let pix = pix_from_dynamic(&img)?;
    tracing::debug!(
        path = %path.display(),
        width = pix.width(),
        height = pix.height(),
        depth = pix.depth().bits(),
        "read image"
    );
    Ok(pix)
}

/// Decode an in-memory encoded image into a `Pix`.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let img = image::load_from_memory(data)?;
    pix_from_dynamic(&img)
}

fn pix_from_dynamic(img: &DynamicImage) -> IoResult<Pix> {
    if img.color().has_color() {
        let rgb = img.to_rgb8();
        let (w, h) = rgb.dimensions();
        let data = rgb
            .pixels()
            .map(|p| color::compose_rgb(p.0[0], p.0[1], p.0[2]))
            .collect();
        Ok(Pix::from_raw(w, h, PixelDepth::Bit32, data)?)
    } else {
        let gray = img.to_luma8();
        let (w, h) = gray.dimensions();
        let data = gray.into_raw().into_iter().map(u32::from).collect();
        Ok(Pix::from_raw(w, h, PixelDepth::Bit8, data)?)
    }
}

/// Convert a `Pix` into an `image` buffer.
///
/// 1 bpp masks are written with foreground white (255) on black, which
/// is how binarized glyph masks are displayed.
pub fn pix_to_dynamic(pix: &Pix) -> IoResult<DynamicImage> {
    let (w, h) = (pix.width(), pix.height());
    let img = match pix.depth() {
        PixelDepth::Bit1 => {
            let buf = pix.data().iter().map(|&v| if v != 0 { 255 } else { 0 }).collect();
            DynamicImage::ImageLuma8(
                GrayImage::from_raw(w, h, buf)
                    .ok_or_else(|| IoError::InvalidData("1 bpp buffer size".into()))?,
            )
        }
        PixelDepth::Bit8 => {
            let buf = pix.data().iter().map(|&v| v as u8).collect();
            DynamicImage::ImageLuma8(
                GrayImage::from_raw(w, h, buf)
                    .ok_or_else(|| IoError::InvalidData("8 bpp buffer size".into()))?,
            )
        }
        PixelDepth::Bit32 => {
            let mut buf = Vec::with_capacity(pix.data().len() * 3);
            for &p in pix.data() {
                let (r, g, b) = color::extract_rgb(p);
                buf.extend_from_slice(&[r, g, b]);
            }
            DynamicImage::ImageRgb8(
                RgbImage::from_raw(w, h, buf)
                    .ok_or_else(|| IoError::InvalidData("32 bpp buffer size".into()))?,
            )
        }
    };
    Ok(img)
}

/// Write a `Pix` to a file. The format is chosen from the extension.
///
/// # Errors
///
/// Returns [`IoError::Image`] if the extension is not a supported format
/// or encoding fails.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    pix_to_dynamic(pix)?.save(path)?;
    tracing::debug!(path = %path.display(), "wrote image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_maps_to_white_foreground() {
        let pix = Pix::from_raw(2, 1, PixelDepth::Bit1, vec![1, 0]).unwrap();
        let img = pix_to_dynamic(&pix).unwrap();
        let gray = img.to_luma8();
        assert_eq!(gray.into_raw(), vec![255, 0]);
    }

    #[test]
    fn test_gray_image_stays_gray() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_raw(2, 1, vec![7, 200]).unwrap());
        let pix = pix_from_dynamic(&img).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.data(), &[7, 200]);
    }

    #[test]
    fn test_color_image_is_32bpp() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_raw(1, 1, vec![65, 203, 62]).unwrap());
        let pix = pix_from_dynamic(&img).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(0, 0), Some((65, 203, 62)));
    }
}
