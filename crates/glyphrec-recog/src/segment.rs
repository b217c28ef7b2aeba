//! Glyph segmentation
//!
//! Every outermost connected shape of a binary mask becomes one glyph: its
//! contour, its bounding box and a fixed-size resampled crop of the mask
//! (the normalized sample that is stored in the knowledge base and fed to
//! the classifier).

use crate::backend::{NativeBackend, VisionBackend};
use crate::{RecogError, RecogResult};
use glyphrec_core::{Box, Pix, PixelDepth};
use glyphrec_region::{Border, BorderPoint, ContourMode};
use glyphrec_transform::scale_to_size;

/// Default normalized sample width
pub const SAMPLE_WIDTH: u32 = 30;

/// Default normalized sample height
pub const SAMPLE_HEIGHT: u32 = 30;

/// Number of values in a default-sized sample
pub const SAMPLE_LEN: usize = (SAMPLE_WIDTH * SAMPLE_HEIGHT) as usize;

/// Order in which glyphs are returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentOrder {
    /// Raster order of the first pixel of each shape (default)
    #[default]
    Discovery,
    /// Text lines top to bottom, glyphs left to right within a line
    Reading,
}

/// Segmentation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Width of normalized samples (default: 30)
    pub sample_width: u32,
    /// Height of normalized samples (default: 30)
    pub sample_height: u32,
    /// Glyph order (default: discovery)
    pub order: SegmentOrder,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            sample_width: SAMPLE_WIDTH,
            sample_height: SAMPLE_HEIGHT,
            order: SegmentOrder::Discovery,
        }
    }
}

impl SegmentOptions {
    /// Set the normalized sample size
    pub fn with_sample_size(mut self, width: u32, height: u32) -> Self {
        self.sample_width = width;
        self.sample_height = height;
        self
    }

    /// Set the glyph order
    pub fn with_order(mut self, order: SegmentOrder) -> Self {
        self.order = order;
        self
    }
}

/// Fixed-size grid of values in `0.0..=255.0`, foreground = 255
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSample {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl NormalizedSample {
    /// Create a sample from row-major values.
    ///
    /// # Errors
    /// Returns [`RecogError::InvalidParameter`] if the size is zero or
    /// `values` does not hold `width * height` entries.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> RecogResult<Self> {
        if width == 0 || height == 0 || values.len() != (width as usize) * (height as usize) {
            return Err(RecogError::InvalidParameter(format!(
                "sample of {}x{} cannot hold {} values",
                width,
                height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Create a sample from an 8 bpp image.
    pub fn from_pix(pix: &Pix) -> RecogResult<Self> {
        if pix.depth() != PixelDepth::Bit8 {
            return Err(RecogError::UnsupportedDepth {
                expected: "8 bpp",
                actual: pix.depth().bits(),
            });
        }
        let values = pix.data().iter().map(|&v| v as f32).collect();
        Self::new(pix.width(), pix.height(), values)
    }

    /// Convert back to an 8 bpp image (values are rounded and clamped).
    pub fn to_pix(&self) -> RecogResult<Pix> {
        let data = self
            .values
            .iter()
            .map(|&v| v.round().clamp(0.0, 255.0) as u32)
            .collect();
        Ok(Pix::from_raw(self.width, self.height, PixelDepth::Bit8, data)?)
    }

    /// Render as text, one line per row: `#` for values of at least 128,
    /// `.` otherwise.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.values.len() + self.height as usize);
        for row in self.values.chunks(self.width as usize) {
            out.extend(row.iter().map(|&v| if v >= 128.0 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }

    /// Sample width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Sample height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major values
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; samples have at least one value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f32]> for NormalizedSample {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// A traced shape and its bounding box
#[derive(Debug, Clone)]
pub struct Shape {
    border: Border,
    bbox: Box,
}

impl Shape {
    /// Wrap a border; `None` if it has no points.
    pub fn from_border(border: Border) -> Option<Self> {
        let bbox = border.bounding_box()?;
        Some(Self { border, bbox })
    }

    /// Contour points in traversal order
    pub fn points(&self) -> &[BorderPoint] {
        &self.border.points
    }

    /// Inclusive extent of the contour points
    pub fn bounding_box(&self) -> Box {
        self.bbox
    }

    /// The underlying border
    pub fn border(&self) -> &Border {
        &self.border
    }
}

/// One segmented glyph
#[derive(Debug, Clone)]
pub struct Glyph {
    pub shape: Shape,
    pub sample: NormalizedSample,
}

/// Segment a mask with the native backend.
pub fn segment(mask: &Pix, options: &SegmentOptions) -> RecogResult<Vec<Glyph>> {
    segment_with(&NativeBackend, mask, options)
}

/// Segment a mask into glyphs.
///
/// Only outermost shapes are used; shapes inside the holes of another
/// shape belong to it. Each bounding box is cropped from the mask (other
/// shapes reaching into the box included) and area-resampled to the
/// sample size.
///
/// Discovery order is raster order of each shape's first pixel (top
/// first), the reverse of OpenCV's `findContours`, so dedup reference
/// chains and prompt sequences can differ from tools built on it.
///
/// # Arguments
/// * `backend` - Provider of contour extraction
/// * `mask` - 1 bpp mask, foreground = ink
/// * `options` - Sample size and glyph order
///
/// # Errors
/// Returns [`RecogError::UnsupportedDepth`] if `mask` is not 1 bpp.
pub fn segment_with<B: VisionBackend + ?Sized>(
    backend: &B,
    mask: &Pix,
    options: &SegmentOptions,
) -> RecogResult<Vec<Glyph>> {
    if mask.depth() != PixelDepth::Bit1 {
        return Err(RecogError::UnsupportedDepth {
            expected: "1 bpp",
            actual: mask.depth().bits(),
        });
    }

    let borders = backend.find_contours(mask, ContourMode::External)?;
    let mut glyphs = Vec::with_capacity(borders.len());
    for border in borders {
        let Some(shape) = Shape::from_border(border) else {
            tracing::trace!("skipping empty contour");
            continue;
        };
        let bbox = shape.bounding_box();
        if bbox.is_empty() {
            tracing::trace!(?bbox, "skipping zero-area shape");
            continue;
        }
        let crop = mask.clip_rectangle(&bbox)?;
        let scaled = scale_to_size(&crop, options.sample_width, options.sample_height)?;
        let sample = NormalizedSample::from_pix(&scaled)?;
        glyphs.push(Glyph { shape, sample });
    }

    if options.order == SegmentOrder::Reading {
        sort_reading_order(&mut glyphs);
    }
    tracing::debug!(count = glyphs.len(), "segmented glyphs");
    Ok(glyphs)
}

/// Group glyphs into lines of vertically overlapping boxes, then order
/// lines by top edge and glyphs within a line by left edge.
fn sort_reading_order(glyphs: &mut Vec<Glyph>) {
    glyphs.sort_by_key(|g| {
        let b = g.shape.bounding_box();
        (b.y, b.x)
    });

    // Each line keeps the union of its members' boxes.
    let mut lines: Vec<(Box, Vec<Glyph>)> = Vec::new();
    for glyph in glyphs.drain(..) {
        let b = glyph.shape.bounding_box();
        match lines.last_mut() {
            Some((band, members)) if band.overlaps_vertically(&b) => {
                let (x0, y0) = (band.x.min(b.x), band.y.min(b.y));
                let (x1, y1) = (band.right().max(b.right()), band.bottom().max(b.bottom()));
                *band = Box::new_unchecked(x0, y0, x1 - x0, y1 - y0);
                members.push(glyph);
            }
            _ => lines.push((b, vec![glyph])),
        }
    }

    for (_, mut members) in lines {
        members.sort_by_key(|g| g.shape.bounding_box().x);
        glyphs.extend(members);
    }
}
