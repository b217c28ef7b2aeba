//! Contour fill
//!
//! Solid filling of the area enclosed by a traced border, used to erase
//! whole shapes from a mask.

use crate::ccbord::Border;
use crate::error::{RegionError, RegionResult};
use glyphrec_core::{PixMut, PixelDepth};

/// Fill the area enclosed by `border`, including the border itself, with
/// `value`. Parts outside the image are ignored.
///
/// Everything inside the border polygon is overwritten, so regions nested
/// in holes of the shape are filled as well.
///
/// # Returns
///
/// The number of image pixels written.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for 32 bpp images.
pub fn fill_border(pix: &mut PixMut, border: &Border, value: u32) -> RegionResult<u32> {
    if pix.depth() == PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1 or 8 bpp",
            actual: 32,
        });
    }
    let Some(bbox) = border.bounding_box() else {
        return Ok(0);
    };

    // Local grid with a one-pixel margin: 1 = border, 2 = outside.
    let lw = (bbox.w + 2) as usize;
    let lh = (bbox.h + 2) as usize;
    let mut local = vec![0u8; lw * lh];
    for p in &border.points {
        let lx = (p.x - bbox.x + 1) as usize;
        let ly = (p.y - bbox.y + 1) as usize;
        local[ly * lw + lx] = 1;
    }

    // 4-connected flood of the outside cannot cross an 8-connected border.
    let mut stack = vec![0usize];
    local[0] = 2;
    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % lw, idx / lw);
        let mut visit = |nidx: usize| {
            if local[nidx] == 0 {
                local[nidx] = 2;
                stack.push(nidx);
            }
        };
        if x > 0 {
            visit(idx - 1);
        }
        if x + 1 < lw {
            visit(idx + 1);
        }
        if y > 0 {
            visit(idx - lw);
        }
        if y + 1 < lh {
            visit(idx + lw);
        }
    }

    let value = value & pix.depth().max_value();
    let (width, height) = (pix.width() as i32, pix.height() as i32);
    let mut written = 0u32;
    for ly in 1..lh - 1 {
        for lx in 1..lw - 1 {
            if local[ly * lw + lx] == 2 {
                continue;
            }
            let x = bbox.x + lx as i32 - 1;
            let y = bbox.y + ly as i32 - 1;
            if x >= 0 && y >= 0 && x < width && y < height {
                pix.set_pixel_unchecked(x as u32, y as u32, value);
                written += 1;
            }
        }
    }
    Ok(written)
}
