//! Occupancy grid and grid-based pathfinding.
//!
//! The grid is written once at level load and is read-only afterwards, so it
//! is shared behind an `Arc` by every pathfinder of the level.

mod pathfinder;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Rect, Vec2};

pub use pathfinder::{GridPathfinder, Path, find_path};

/// One grid-aligned cell. Signed so neighbours of border cells can be expressed
/// and rejected by bounds checks instead of underflowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// Cell containing a world-space point.
    pub fn containing(point: Vec2, cell_size: f32) -> Self {
        Self::new(
            (point.x / cell_size).floor() as i32,
            (point.y / cell_size).floor() as i32,
        )
    }

    /// World-space top-left corner of this cell.
    pub fn origin(self, cell_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * cell_size, self.y as f32 * cell_size)
    }
}

/// Number of cells an agent covers, anchored at its top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub w: u32,
    pub h: u32,
}

impl Footprint {
    pub const SINGLE: Self = Self { w: 1, h: 1 };

    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Smallest footprint covering an entity of the given world size.
    pub fn covering(w: f32, h: f32, cell_size: f32) -> Self {
        Self::new(
            ((w / cell_size).ceil() as u32).max(1),
            ((h / cell_size).ceil() as u32).max(1),
        )
    }
}

/// Errors raised while building a grid from level data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({x}, {y}) has value {value}, expected 0 or 1")]
    InvalidValue { x: usize, y: usize, value: u8 },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::Empty => "GRID_EMPTY",
            GridError::Ragged { .. } => "GRID_RAGGED",
            GridError::InvalidValue { .. } => "GRID_INVALID_VALUE",
        }
    }
}

/// Static blocked/free map of a level. `true` means blocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
}

impl OccupancyGrid {
    /// Builds a grid from rows of `0` (free) and `1` (blocked).
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }

        let mut blocked = Vec::with_capacity(expected * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(GridError::Ragged {
                    row: y,
                    expected,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => blocked.push(false),
                    1 => blocked.push(true),
                    value => return Err(GridError::InvalidValue { x, y, value }),
                }
            }
        }

        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            blocked,
        })
    }

    /// Grid of the given size with no blocked cells.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(index) => self.blocked[index],
            None => true,
        }
    }

    /// Marks a cell; only meant for level construction and tests.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) {
        if let Some(index) = self.index(cell) {
            self.blocked[index] = blocked;
        }
    }

    /// True if a world-space rectangle overlaps any blocked or out-of-bounds cell.
    pub fn rect_blocked(&self, rect: &Rect, cell_size: f32) -> bool {
        // Shrink by a hair so a rect flush against a cell edge does not count
        // the neighbouring cell.
        const EPSILON: f32 = 0.001;
        let first = Cell::containing(rect.origin, cell_size);
        let last = Cell::containing(
            Vec2::new(rect.right() - EPSILON, rect.bottom() - EPSILON),
            cell_size,
        );

        (first.y..=last.y).any(|y| (first.x..=last.x).any(|x| self.is_blocked(Cell::new(x, y))))
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Size;

    #[test]
    fn from_rows_validates_shape_and_values() {
        assert_eq!(OccupancyGrid::from_rows(&[]), Err(GridError::Empty));
        assert_eq!(
            OccupancyGrid::from_rows(&[vec![0, 0], vec![0]]),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            OccupancyGrid::from_rows(&[vec![0, 2]]),
            Err(GridError::InvalidValue { x: 1, y: 0, value: 2 })
        );

        let grid = OccupancyGrid::from_rows(&[vec![0, 1], vec![0, 0]]).unwrap();
        assert!(grid.is_blocked(Cell::new(1, 0)));
        assert!(!grid.is_blocked(Cell::new(1, 1)));
        assert!(grid.is_blocked(Cell::new(-1, 0)));
        assert!(grid.is_blocked(Cell::new(0, 2)));
    }

    #[test]
    fn rect_blocked_respects_cell_edges() {
        let grid = OccupancyGrid::from_rows(&[vec![0, 1], vec![0, 0]]).unwrap();
        let flush = Rect::new(Vec2::new(0.0, 0.0), Size::new(32.0, 32.0));
        let overlapping = Rect::new(Vec2::new(1.0, 0.0), Size::new(32.0, 32.0));
        let outside = Rect::new(Vec2::new(-4.0, 32.0), Size::new(10.0, 10.0));

        assert!(!grid.rect_blocked(&flush, 32.0));
        assert!(grid.rect_blocked(&overlapping, 32.0));
        assert!(grid.rect_blocked(&outside, 32.0));
    }

    #[test]
    fn footprint_covers_entity_size() {
        assert_eq!(Footprint::covering(20.0, 20.0, 32.0), Footprint::SINGLE);
        assert_eq!(Footprint::covering(40.0, 64.0, 32.0), Footprint::new(2, 2));
    }
}
