//! Rectangle clipping

use super::Pix;
use crate::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract the part of the image covered by `region`.
    ///
    /// The region is first clipped to the image bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyClip`] if the region does not intersect the image.
    pub fn clip_rectangle(&self, region: &Box) -> Result<Pix> {
        let b = region.clip_to(self.width(), self.height()).ok_or(Error::EmptyClip {
            x: region.x,
            y: region.y,
            w: region.w,
            h: region.h,
        })?;

        let mut data = Vec::with_capacity(b.area() as usize);
        for y in b.y..b.bottom() {
            let row = self.row_data(y as u32);
            data.extend_from_slice(&row[b.x as usize..b.right() as usize]);
        }
        Pix::from_raw(b.w as u32, b.h as u32, self.depth(), data)
    }
}
