//! Grid geometry for the 5x5 recall board.
//!
//! Cells are addressed by a single linear index in row-major order:
//! `row = index / GRID_SIZE`, `col = index % GRID_SIZE`.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Width and height of the board.
pub const GRID_SIZE: usize = 5;

/// Number of cells on the board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A validated cell on the board.
///
/// A `Cell` can only be built from an index in `0..CELL_COUNT`, so every
/// pattern and selection made of cells is in range by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Cell(u8);

impl Cell {
    /// Creates a cell from a linear index.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if `index >= CELL_COUNT`.
    #[instrument]
    pub fn new(index: usize) -> Result<Self, GridError> {
        if index < CELL_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(GridError::OutOfRange {
                index,
                cell_count: CELL_COUNT,
            })
        }
    }

    /// Creates a cell from row and column.
    #[instrument]
    pub fn at(row: usize, col: usize) -> Result<Self, GridError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(GridError::OutOfRange {
                index: row * GRID_SIZE + col,
                cell_count: CELL_COUNT,
            });
        }
        Self::new(row * GRID_SIZE + col)
    }

    /// Returns the linear index (0-24).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the row (0-4).
    pub fn row(self) -> usize {
        self.index() / GRID_SIZE
    }

    /// Returns the column (0-4).
    pub fn col(self) -> usize {
        self.index() % GRID_SIZE
    }

    /// 1-based label shown on the board.
    pub fn label(self) -> usize {
        self.index() + 1
    }

    /// Iterates every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT as u8).map(Cell)
    }

    /// Returns the neighbouring cell one step in `direction`, or `None` at the edge.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let (row, col) = (self.row(), self.col());
        let (row, col) = match direction {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right => (row, col + 1),
        };
        Cell::at(row, col).ok()
    }
}

impl TryFrom<usize> for Cell {
    type Error = GridError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Cell::new(index)
    }
}

impl From<Cell> for usize {
    fn from(cell: Cell) -> Self {
        cell.index()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Orthogonal step on the board, used for cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}
