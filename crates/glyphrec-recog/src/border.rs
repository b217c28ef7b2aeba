//! Removal of shapes touching the page edges
//!
//! Scanned pages often have dark margins, binder holes or the edge of the
//! next page in view. Anything that comes within `radius` pixels of an
//! image edge is erased before segmentation.

use crate::RecogResult;
use crate::backend::{NativeBackend, VisionBackend};
use glyphrec_core::Pix;
use glyphrec_region::{ContourMode, fill_border};

/// Border cleanup settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderOptions {
    /// Whether border shapes are erased at all (default: true)
    pub enabled: bool,
    /// Width of the edge band in pixels (default: 50)
    pub radius: u32,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 50,
        }
    }
}

impl BorderOptions {
    /// Enable or disable border cleanup
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the edge band width
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }
}

/// Erase border-touching shapes using the native backend.
pub fn clear_border_shapes(mask: &Pix, radius: u32) -> RecogResult<Pix> {
    clear_border_shapes_with(&NativeBackend, mask, radius)
}

/// Erase every shape with a contour point inside the edge band.
///
/// A point at row `r`, column `c` is inside the band when `r < radius`,
/// `r >= rows - 1 - radius`, `c < radius` or `c >= cols - 1 - radius`.
/// Touching shapes are filled solid with background, so whatever lies in
/// their holes disappears too. A radius of half the smaller dimension or
/// more erases everything.
///
/// # Arguments
/// * `backend` - Provider of contour extraction
/// * `mask` - 1 bpp mask
/// * `radius` - Width of the edge band
///
/// # Returns
/// A new mask; the input is not modified.
pub fn clear_border_shapes_with<B: VisionBackend + ?Sized>(
    backend: &B,
    mask: &Pix,
    radius: u32,
) -> RecogResult<Pix> {
    let borders = backend.find_contours(mask, ContourMode::List)?;
    let (width, height) = (mask.width(), mask.height());
    let distance = i32::try_from(radius).unwrap_or(i32::MAX);

    let mut out = mask.to_mut();
    let mut erased = 0usize;
    for border in borders
        .iter()
        .filter(|b| b.touches_band(width, height, distance))
    {
        fill_border(&mut out, border, 0)?;
        erased += 1;
    }
    tracing::debug!(radius, erased, "cleared border shapes");
    Ok(out.into())
}
