//! Synthetic images for tests
//!
//! Masks are described as ASCII art: `#` (or `X`) is foreground, anything
//! else is background. Pages are rendered from masks as dark ink on light
//! paper, optionally enlarged so the strokes survive binarization.

use crate::error::{TestError, TestResult};
use glyphrec_core::{Pix, PixMut, PixelDepth, color};

/// Ink color used by [`render_page`]
pub const INK: (u8, u8, u8) = (20, 20, 30);

/// Paper color used by [`render_page`]
pub const PAPER: (u8, u8, u8) = (240, 238, 232);

/// Build a 1 bpp mask from ASCII rows.
///
/// # Errors
///
/// Returns [`TestError::Fixture`] if there are no rows or the rows differ
/// in length.
pub fn mask_from_ascii(rows: &[&str]) -> TestResult<Pix> {
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
    if width == 0 {
        return Err(TestError::Fixture("empty ascii mask".into()));
    }
    let mut data = Vec::with_capacity(width * rows.len());
    for (i, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(TestError::Fixture(format!(
                "row {} has {} columns, expected {}",
                i,
                row.chars().count(),
                width
            )));
        }
        data.extend(row.chars().map(|c| u32::from(c == '#' || c == 'X')));
    }
    Pix::from_raw(width as u32, rows.len() as u32, PixelDepth::Bit1, data)
        .map_err(|e| TestError::Fixture(e.to_string()))
}

/// Set every pixel of a rectangle, clipped to the image.
pub fn fill_rect(pm: &mut PixMut, x: i32, y: i32, w: i32, h: i32, val: u32) {
    let (width, height) = (pm.width() as i32, pm.height() as i32);
    for yy in y.max(0)..(y + h).min(height) {
        for xx in x.max(0)..(x + w).min(width) {
            pm.set_pixel_unchecked(xx as u32, yy as u32, val);
        }
    }
}

/// Create a 1 bpp image with a single filled rectangle.
pub fn make_binary_rect(width: u32, height: u32, x: i32, y: i32, w: i32, h: i32) -> TestResult<Pix> {
    let pix = Pix::new(width, height, PixelDepth::Bit1)
        .map_err(|e| TestError::Fixture(e.to_string()))?;
    let mut pm = pix.to_mut();
    fill_rect(&mut pm, x, y, w, h, 1);
    Ok(pm.into())
}

/// Render a mask as a 32 bpp page, each mask pixel becoming a
/// `scale` x `scale` block of [`INK`] (foreground) or [`PAPER`].
pub fn render_page(mask: &Pix, scale: u32) -> TestResult<Pix> {
    let scale = scale.max(1);
    let page = Pix::new(mask.width() * scale, mask.height() * scale, PixelDepth::Bit32)
        .map_err(|e| TestError::Fixture(e.to_string()))?;
    let mut pm = page.to_mut();
    let ink = color::compose_rgb(INK.0, INK.1, INK.2);
    let paper = color::compose_rgb(PAPER.0, PAPER.1, PAPER.2);
    for y in 0..pm.height() {
        for x in 0..pm.width() {
            let fg = mask.get_pixel_unchecked(x / scale, y / scale) != 0;
            pm.set_pixel_unchecked(x, y, if fg { ink } else { paper });
        }
    }
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_from_ascii() {
        let pix = mask_from_ascii(&["#..", ".X.", "..#"]).unwrap();
        assert_eq!(pix.width(), 3);
        assert_eq!(pix.count_pixels(), 3);
        assert_eq!(pix.get_pixel(1, 1), Some(1));
        assert!(mask_from_ascii(&["##", "#"]).is_err());
        assert!(mask_from_ascii(&[]).is_err());
    }

    #[test]
    fn test_render_page() {
        let mask = mask_from_ascii(&["#.", ".."]).unwrap();
        let page = render_page(&mask, 3).unwrap();
        assert_eq!(page.width(), 6);
        assert_eq!(page.get_rgb(2, 2), Some(INK));
        assert_eq!(page.get_rgb(3, 0), Some(PAPER));
    }

    #[test]
    fn test_make_binary_rect_clips() {
        let pix = make_binary_rect(10, 10, 8, 8, 5, 5).unwrap();
        assert_eq!(pix.count_pixels(), 4);
    }
}
