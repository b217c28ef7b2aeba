//! Erosion, dilation, opening and closing of 1 bpp masks
//!
//! # Boundary handling
//!
//! Pixels outside the image never contribute: dilation treats them as
//! background and erosion ignores them, so a shape touching the border is
//! not eaten away from the outside.

use crate::{MorphError, MorphResult, Sel};
use glyphrec_core::{Pix, PixelDepth};

/// Grow the foreground: a pixel turns on when the reflected hits of `sel`
/// placed on it reach any foreground pixel.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let offsets: Vec<_> = sel.hit_offsets().collect();
    Ok(apply(pix, &offsets, false)?)
}

/// Shrink the foreground: a pixel stays on only when every in-image hit of
/// `sel` placed on it lands on foreground.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let offsets: Vec<_> = sel.hit_offsets().collect();
    Ok(apply(pix, &offsets, true)?)
}

/// Erode then dilate. Drops specks and strokes thinner than `sel`.
pub fn open(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    if sel.is_brick() {
        return open_brick(pix, sel.width(), sel.height());
    }
    let eroded = erode(pix, sel)?;
    dilate(&eroded, sel)
}

/// Dilate then erode. Bridges gaps and pinholes smaller than `sel`.
pub fn close(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    if sel.is_brick() {
        return close_brick(pix, sel.width(), sel.height());
    }
    let dilated = dilate(pix, sel)?;
    erode(&dilated, sel)
}

/// Dilate with a `width` x `height` brick, as a horizontal then a
/// vertical line pass.
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    let h = dilate(pix, &Sel::create_horizontal(width)?)?;
    dilate(&h, &Sel::create_vertical(height)?)
}

/// Erode with a `width` x `height` brick, as a horizontal then a
/// vertical line pass.
pub fn erode_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    let h = erode(pix, &Sel::create_horizontal(width)?)?;
    erode(&h, &Sel::create_vertical(height)?)
}

/// Open with a `width` x `height` brick
pub fn open_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let eroded = erode_brick(pix, width, height)?;
    dilate_brick(&eroded, width, height)
}

/// Close with a `width` x `height` brick
pub fn close_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    let dilated = dilate_brick(pix, width, height)?;
    erode_brick(&dilated, width, height)
}

fn apply(pix: &Pix, offsets: &[(i32, i32)], erosion: bool) -> glyphrec_core::Result<Pix> {
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let src = pix.data();
    let mut out = pix.create_template().to_mut();
    let dst = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let hit = if erosion {
                offsets.iter().all(|&(dx, dy)| {
                    let (sx, sy) = (x + dx, y + dy);
                    sx < 0 || sy < 0 || sx >= w || sy >= h || src[(sy * w + sx) as usize] != 0
                })
            } else {
                offsets.iter().any(|&(dx, dy)| {
                    let (sx, sy) = (x - dx, y - dy);
                    sx >= 0 && sy >= 0 && sx < w && sy < h && src[(sy * w + sx) as usize] != 0
                })
            };
            dst[(y * w + x) as usize] = u32::from(hit);
        }
    }
    Ok(out.into())
}

fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_binary(width: u32, height: u32, on: &[(u32, u32)]) -> Pix {
        let pix = Pix::new(width, height, PixelDepth::Bit1).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for &(x, y) in on {
            pm.set_pixel(x, y, 1).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_dilate_single_pixel_cross() {
        let pix = make_binary(5, 5, &[(2, 2)]);
        let out = dilate(&pix, &Sel::create_cross(3).unwrap()).unwrap();
        assert_eq!(out.count_pixels(), 5);
        assert_eq!(out.get_pixel(2, 1), Some(1));
        assert_eq!(out.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_erode_keeps_border_shapes() {
        // A full image stays full: outside pixels do not erode.
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        let mut pm = pix.to_mut();
        pm.set_all(1);
        let pix: Pix = pm.into();
        let out = erode(&pix, &Sel::create_square(3).unwrap()).unwrap();
        assert_eq!(out.count_pixels(), 16);
    }

    #[test]
    fn test_open_removes_thin_line() {
        let line: Vec<_> = (0..8).map(|x| (x, 3)).collect();
        let pix = make_binary(8, 8, &line);
        let out = open(&pix, &Sel::create_cross(3).unwrap()).unwrap();
        assert_eq!(out.count_pixels(), 0);
    }

    #[test]
    fn test_close_fills_gap() {
        let pix = make_binary(9, 3, &[(1, 1), (2, 1), (3, 1), (5, 1), (6, 1), (7, 1)]);
        let out = close(&pix, &Sel::create_square(5).unwrap()).unwrap();
        assert_eq!(out.get_pixel(4, 1), Some(1));
    }

    #[test]
    fn test_brick_matches_generic() {
        let pix = make_binary(12, 10, &[(2, 2), (3, 2), (8, 7), (9, 9), (5, 5), (6, 5)]);
        let sel = Sel::create_square(5).unwrap();
        let dilated = dilate(&pix, &sel).unwrap();
        let fast = dilate_brick(&pix, 5, 5).unwrap();
        assert_eq!(dilated.data(), fast.data());
        let eroded = erode(&dilated, &sel).unwrap();
        let fast = erode_brick(&dilated, 5, 5).unwrap();
        assert_eq!(eroded.data(), fast.data());
    }

    #[test]
    fn test_rejects_gray() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(dilate(&pix, &Sel::create_cross(3).unwrap()).is_err());
    }
}
