//! Border following for binary images
//!
//! Traces the borders of every connected foreground region of a 1 bpp
//! mask with the Suzuki-Abe topological border-following scan:
//!
//! - the image is scanned in raster order (top to bottom, left to right)
//! - an *outer* border starts at a foreground pixel whose west neighbor
//!   is background; a *hole* border starts at a foreground pixel whose
//!   east neighbor is background and that is not already enclosed
//! - each border is followed with 8-connectivity and stamped with its
//!   sequence number so it is never traced twice
//!
//! Borders are returned in discovery order. Each border knows its parent
//! (the border that immediately encloses it), which is how
//! [`ContourMode::External`] selects the outermost regions only.

use crate::error::{RegionError, RegionResult};
use glyphrec_core::{Box, Pix, PixelDepth};

/// Direction for border traversal (8-connected, clockwise from East on a
/// y-down raster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// East (1, 0)
    East = 0,
    /// Southeast (1, 1)
    SouthEast = 1,
    /// South (0, 1)
    South = 2,
    /// Southwest (-1, 1)
    SouthWest = 3,
    /// West (-1, 0)
    West = 4,
    /// Northwest (-1, -1)
    NorthWest = 5,
    /// North (0, -1)
    North = 6,
    /// Northeast (1, -1)
    NorthEast = 7,
}

/// X offset for each direction
const XPOSTAB: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];

/// Y offset for each direction
const YPOSTAB: [i32; 8] = [0, 1, 1, 1, 0, -1, -1, -1];

impl Direction {
    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> i32 {
        XPOSTAB[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> i32 {
        YPOSTAB[self as usize]
    }

    /// Get direction from x,y offsets
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        (0..8)
            .find(|&i| XPOSTAB[i] == dx && YPOSTAB[i] == dy)
            .map(Self::from_index)
    }

    /// Create direction from index (taken modulo 8)
    #[inline]
    fn from_index(idx: usize) -> Self {
        match idx % 8 {
            0 => Direction::East,
            1 => Direction::SouthEast,
            2 => Direction::South,
            3 => Direction::SouthWest,
            4 => Direction::West,
            5 => Direction::NorthWest,
            6 => Direction::North,
            _ => Direction::NorthEast,
        }
    }

    /// The next direction clockwise
    #[inline]
    pub fn clockwise(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    /// The next direction counterclockwise
    #[inline]
    pub fn counterclockwise(self) -> Self {
        Self::from_index(self as usize + 7)
    }
}

/// A point on a border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderPoint {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl BorderPoint {
    /// Create a new border point
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move in the given direction
    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        Self {
            x: self.x + dir.dx(),
            y: self.y + dir.dy(),
        }
    }
}

impl From<(i32, i32)> for BorderPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Border type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    /// Outer border of a foreground region
    #[default]
    Outer,
    /// Border between a foreground region and a hole inside it
    Hole,
}

/// Which borders [`find_contours`] returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourMode {
    /// Outer borders not enclosed by any other region
    #[default]
    External,
    /// Every outer and hole border
    List,
}

/// A single traced border (outer or hole)
#[derive(Debug, Clone, Default)]
pub struct Border {
    /// Type of this border
    pub border_type: BorderType,
    /// Border pixels in traversal order
    pub points: Vec<BorderPoint>,
    /// Index of the immediately enclosing border in the list returned by
    /// [`find_contours`] with [`ContourMode::List`]; `None` for the frame
    pub parent: Option<usize>,
}

impl Border {
    /// Create a new border from points
    pub fn new(border_type: BorderType, points: Vec<BorderPoint>) -> Self {
        Self {
            border_type,
            points,
            parent: None,
        }
    }

    /// Get the number of points in this border
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the border is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the traversal
    pub fn start(&self) -> Option<BorderPoint> {
        self.points.first().copied()
    }

    /// Get the bounding box of this border (inclusive extent of its points)
    pub fn bounding_box(&self) -> Option<Box> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Box::from_extent(min_x, min_y, max_x, max_y))
    }

    /// Check whether any point lies within `distance` pixels of the edge
    /// of a `width` x `height` image: row `< distance` or
    /// `>= height - 1 - distance`, same for columns.
    pub fn touches_band(&self, width: u32, height: u32, distance: i32) -> bool {
        let (rows, cols) = (height as i32, width as i32);
        self.points.iter().any(|p| {
            p.y < distance
                || p.y >= rows - 1 - distance
                || p.x < distance
                || p.x >= cols - 1 - distance
        })
    }
}

/// Trace the borders of a 1 bpp image.
///
/// # Arguments
///
/// * `pix` - Binary mask (foreground = 1)
/// * `mode` - [`ContourMode::External`] for outermost borders only,
///   [`ContourMode::List`] for every border
///
/// # Returns
///
/// Borders in discovery order: sorted by the raster position of their
/// first pixel.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] if the image is not 1 bpp.
pub fn find_contours(pix: &Pix, mode: ContourMode) -> RegionResult<Vec<Border>> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bit",
            actual: pix.depth().bits(),
        });
    }

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let mut grid = LabelGrid::new(pix);
    let mut borders: Vec<Border> = Vec::new();

    // Border number n >= 2 is borders[n - 2]; 1 is the image frame.
    let mut nbd: i32 = 1;
    for y in 1..=h {
        let mut lnbd: i32 = 1;
        for x in 1..=w {
            let idx = grid.index(x, y);
            let val = grid.cells[idx];
            if val == 0 {
                continue;
            }

            let start = if val == 1 && grid.cells[idx - 1] == 0 {
                Some((BorderType::Outer, Direction::West))
            } else if val >= 1 && grid.cells[idx + 1] == 0 {
                if val > 1 {
                    lnbd = val;
                }
                Some((BorderType::Hole, Direction::East))
            } else {
                None
            };

            if let Some((border_type, from)) = start {
                nbd += 1;
                let parent = parent_of(&borders, border_type, lnbd);
                let points = grid.follow(idx, from, nbd);
                borders.push(Border {
                    border_type,
                    points,
                    parent,
                });
            }

            let val = grid.cells[idx];
            if val != 1 {
                lnbd = val.abs();
            }
        }
    }

    Ok(match mode {
        ContourMode::List => borders,
        ContourMode::External => borders
            .into_iter()
            .filter(|b| b.border_type == BorderType::Outer && b.parent.is_none())
            .collect(),
    })
}

/// Parent of a new border given the last border number met on the row.
fn parent_of(borders: &[Border], border_type: BorderType, lnbd: i32) -> Option<usize> {
    if lnbd < 2 {
        return None;
    }
    let last = (lnbd - 2) as usize;
    let last_type = borders[last].border_type;
    if last_type != border_type {
        Some(last)
    } else {
        borders[last].parent
    }
}

/// Working copy of the mask with a zero frame, holding border numbers.
struct LabelGrid {
    cells: Vec<i32>,
    stride: usize,
    offsets: [isize; 8],
}

impl LabelGrid {
    fn new(pix: &Pix) -> Self {
        let w = pix.width() as usize;
        let h = pix.height() as usize;
        let stride = w + 2;
        let mut cells = vec![0i32; stride * (h + 2)];
        for (y, row) in pix.data().chunks_exact(w).enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    cells[(y + 1) * stride + x + 1] = 1;
                }
            }
        }
        let mut offsets = [0isize; 8];
        for (i, off) in offsets.iter_mut().enumerate() {
            *off = YPOSTAB[i] as isize * stride as isize + XPOSTAB[i] as isize;
        }
        Self {
            cells,
            stride,
            offsets,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    fn neighbor(&self, idx: usize, dir: Direction) -> usize {
        (idx as isize + self.offsets[dir as usize]) as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> BorderPoint {
        BorderPoint::new(
            (idx % self.stride) as i32 - 1,
            (idx / self.stride) as i32 - 1,
        )
    }

    fn direction_between(&self, from: usize, to: usize) -> Direction {
        let delta = to as isize - from as isize;
        let i = self.offsets.iter().position(|&o| o == delta).unwrap_or(0);
        Direction::from_index(i)
    }

    /// Follow one border starting at `start`, whose background neighbor
    /// lies in direction `from`, stamping it with `nbd`.
    fn follow(&mut self, start: usize, from: Direction, nbd: i32) -> Vec<BorderPoint> {
        // Clockwise search for the first foreground neighbor.
        let mut dir = from;
        let mut first = None;
        for _ in 0..8 {
            let n = self.neighbor(start, dir);
            if self.cells[n] != 0 {
                first = Some(n);
                break;
            }
            dir = dir.clockwise();
        }
        let Some(first) = first else {
            // Isolated pixel
            self.cells[start] = -nbd;
            return vec![self.point(start)];
        };

        let mut points = Vec::new();
        let mut prev = first;
        let mut cur = start;
        loop {
            // Counterclockwise search starting just after `prev`.
            let mut dir = self.direction_between(cur, prev).counterclockwise();
            let mut east_examined = false;
            let mut next = prev;
            for _ in 0..8 {
                let n = self.neighbor(cur, dir);
                if self.cells[n] != 0 {
                    next = n;
                    break;
                }
                if dir == Direction::East {
                    east_examined = true;
                }
                dir = dir.counterclockwise();
            }

            if east_examined {
                self.cells[cur] = -nbd;
            } else if self.cells[cur] == 1 {
                self.cells[cur] = nbd;
            }
            points.push(self.point(cur));

            if next == start && cur == first {
                break;
            }
            prev = cur;
            cur = next;
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(rows: &[&str]) -> Pix {
        let w = rows[0].len() as u32;
        let data = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| u32::from(c == '#')))
            .collect();
        Pix::from_raw(w, rows.len() as u32, PixelDepth::Bit1, data).unwrap()
    }

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::East.clockwise(), Direction::SouthEast);
        assert_eq!(Direction::East.counterclockwise(), Direction::NorthEast);
        assert_eq!(Direction::from_offset(-1, -1), Some(Direction::NorthWest));
        assert_eq!(Direction::from_offset(0, 0), None);
    }

    #[test]
    fn test_single_pixel() {
        let pix = mask(&["...", ".#.", "..."]);
        let borders = find_contours(&pix, ContourMode::List).unwrap();
        assert_eq!(borders.len(), 1);
        assert_eq!(borders[0].points, vec![BorderPoint::new(1, 1)]);
    }

    #[test]
    fn test_square_outer_border() {
        let pix = mask(&["....", ".##.", ".##.", "...."]);
        let borders = find_contours(&pix, ContourMode::External).unwrap();
        assert_eq!(borders.len(), 1);
        assert_eq!(borders[0].len(), 4);
        assert_eq!(borders[0].start(), Some(BorderPoint::new(1, 1)));
        assert_eq!(
            borders[0].bounding_box(),
            Some(Box::new_unchecked(1, 1, 2, 2))
        );
    }

    #[test]
    fn test_ring_has_hole() {
        let pix = mask(&[
            ".......",
            ".#####.",
            ".#...#.",
            ".#.#.#.",
            ".#...#.",
            ".#####.",
            ".......",
        ]);
        let all = find_contours(&pix, ContourMode::List).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].border_type, BorderType::Outer);
        assert_eq!(all[1].border_type, BorderType::Hole);
        assert_eq!(all[1].parent, Some(0));
        assert_eq!(all[2].border_type, BorderType::Outer);
        assert_eq!(all[2].parent, Some(1));

        let external = find_contours(&pix, ContourMode::External).unwrap();
        assert_eq!(external.len(), 1);
        assert_eq!(external[0].len(), 16);
    }

    #[test]
    fn test_discovery_order() {
        let pix = mask(&["....#", "#....", "..#.."]);
        let borders = find_contours(&pix, ContourMode::External).unwrap();
        let starts: Vec<_> = borders.iter().filter_map(Border::start).collect();
        assert_eq!(
            starts,
            vec![
                BorderPoint::new(4, 0),
                BorderPoint::new(0, 1),
                BorderPoint::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_diagonal_pixels_are_one_region() {
        let pix = mask(&["#..", ".#.", "..#"]);
        let borders = find_contours(&pix, ContourMode::External).unwrap();
        assert_eq!(borders.len(), 1);
        assert_eq!(
            borders[0].bounding_box(),
            Some(Box::new_unchecked(0, 0, 3, 3))
        );
    }

    #[test]
    fn test_touches_band() {
        let b = Border::new(BorderType::Outer, vec![BorderPoint::new(5, 5)]);
        assert!(!b.touches_band(100, 100, 5));
        assert!(b.touches_band(100, 100, 6));
        let b = Border::new(BorderType::Outer, vec![BorderPoint::new(50, 94)]);
        assert!(b.touches_band(100, 100, 5));
        assert!(!b.touches_band(100, 100, 4));
    }

    #[test]
    fn test_rejects_gray() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(find_contours(&pix, ContourMode::List).is_err());
    }
}
