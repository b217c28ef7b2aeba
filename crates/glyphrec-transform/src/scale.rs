//! Area-map scaling
//!
//! Glyph crops have arbitrary sizes and are resampled to a fixed grid
//! before classification. Every output pixel is the area-weighted average
//! of the source pixels it covers, which anti-aliases when shrinking and
//! blends only at cell boundaries when enlarging.

use crate::{TransformError, TransformResult};
use glyphrec_core::{Pix, PixelDepth, convert_binary_to_gray};

/// Scale an image to exactly `width` x `height` with area mapping.
///
/// 1 bpp input is treated as 0 (background) / 255 (foreground) and the
/// result is 8 bpp; 8 bpp input stays 8 bpp.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a zero target size and
/// [`TransformError::UnsupportedDepth`] for 32 bpp input.
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be positive, got {}x{}",
            width, height
        )));
    }
    let gray = match pix.depth() {
        PixelDepth::Bit1 => convert_binary_to_gray(pix, 255)?,
        PixelDepth::Bit8 => pix.clone(),
        PixelDepth::Bit32 => {
            return Err(TransformError::UnsupportedDepth(
                "expected 1 or 8 bpp".to_string(),
            ));
        }
    };
    scale_area_map(&gray, width, height)
}

/// Per-axis source contributions: for each destination index, the list of
/// (source index, weight) pairs with weights summing to 1.
fn area_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = start + scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 1e-9).then(|| (s as usize, overlap / scale))
                })
                .collect()
        })
        .collect()
}

fn scale_area_map(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let wx = area_weights(pix.width(), width);
    let wy = area_weights(pix.height(), height);
    let sw = pix.width() as usize;
    let src = pix.data();

    let mut data = Vec::with_capacity((width * height) as usize);
    for row_weights in &wy {
        for col_weights in &wx {
            let mut acc = 0.0f64;
            for &(sy, wyv) in row_weights {
                for &(sx, wxv) in col_weights {
                    acc += src[sy * sw + sx] as f64 * wyv * wxv;
                }
            }
            data.push(acc.round().clamp(0.0, 255.0) as u32);
        }
    }
    Ok(Pix::from_raw(width, height, PixelDepth::Bit8, data)?)
}
