//! A rectangular walkability grid.
//!
//! [`GridMap`] is an immutable snapshot of which cells an agent may occupy.
//! It is rebuilt from external data for every query cycle and is never
//! mutated by the search.

use std::fmt;

use waypath_core::{Position, Range};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Walkable,
    #[default]
    Blocked,
}

impl CellState {
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Walkable)
    }
}

impl From<bool> for CellState {
    fn from(walkable: bool) -> Self {
        if walkable { Self::Walkable } else { Self::Blocked }
    }
}

/// `1` is walkable; every other value is blocked.
impl From<u8> for CellState {
    fn from(v: u8) -> Self {
        Self::from(v == 1)
    }
}

/// A 2D grid of [`CellState`] values, stored row-major.
///
/// Always rectangular and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridMap {
    cells: Vec<CellState>,
    rows: i32,
    cols: i32,
}

impl GridMap {
    /// Build a grid from rows of `0`/`1` values, `1` meaning walkable.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        Self::collect(rows.iter().map(|r| r.as_ref().iter().map(|&v| CellState::from(v))))
    }

    /// Build a grid from rows of booleans, `true` meaning walkable.
    pub fn from_bools<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, GridError> {
        Self::collect(rows.iter().map(|r| r.as_ref().iter().map(|&v| CellState::from(v))))
    }

    /// Build a grid from a flat row-major cell buffer.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if rows.checked_mul(cols) != Some(cells.len()) {
            return Err(GridError::CellCount {
                expected: rows.saturating_mul(cols),
                found: cells.len(),
            });
        }
        let (Ok(r), Ok(c)) = (i32::try_from(rows), i32::try_from(cols)) else {
            return Err(GridError::TooLarge { rows, cols });
        };
        Ok(Self {
            cells,
            rows: r,
            cols: c,
        })
    }

    fn collect<I, R>(rows: I) -> Result<Self, GridError>
    where
        I: Iterator<Item = R>,
        R: ExactSizeIterator<Item = CellState>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for (i, row) in rows.enumerate() {
            let found = row.len();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(GridError::RaggedRow {
                    row: i,
                    expected,
                    found,
                });
            }
            cells.extend(row);
            height += 1;
        }
        Self::from_cells(height, width.unwrap_or(0), cells)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The range of valid positions, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.rows, self.cols)
    }

    /// Whether `pos` lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.bounds().contains(pos)
    }

    /// The cell at `pos`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.idx(pos).map(|i| self.cells[i])
    }

    /// Whether `pos` is in bounds and walkable.
    #[inline]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(CellState::is_walkable)
    }

    /// Walkable orthogonal neighbors of `pos`, in the order up, down, left,
    /// right.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut buf = Vec::with_capacity(4);
        Pather::neighbors(self, pos, &mut buf);
        buf
    }

    /// All walkable positions in row-major order.
    pub fn walkable_positions(&self) -> Vec<Position> {
        self.bounds()
            .iter()
            .zip(&self.cells)
            .filter(|(_, c)| c.is_walkable())
            .map(|(p, _)| p)
            .collect()
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_walkable()).count()
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Position` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Position) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Convert a flat index back to a `Position`.
    #[inline]
    pub(crate) fn position(&self, idx: usize) -> Position {
        let cols = self.cols as usize;
        Position::new((idx / cols) as i32, (idx % cols) as i32)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

impl Pather for GridMap {
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
        buf.extend(p.neighbors_4().filter(|&n| self.is_walkable(n)));
    }
}

impl WeightedPather for GridMap {
    #[inline]
    fn cost(&self, _from: Position, _to: Position) -> i32 {
        1
    }
}

impl AstarPather for GridMap {
    #[inline]
    fn estimate(&self, from: Position, to: Position) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GridMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            cells: Vec<CellState>,
            rows: usize,
            cols: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        GridMap::from_cells(raw.rows, raw.cols, raw.cells).map_err(serde::de::Error::custom)
    }
}

/// Errors raised when a grid is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows or no columns.
    Empty,
    /// A row's length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A flat cell buffer does not hold `rows * cols` cells.
    CellCount { expected: usize, found: usize },
    /// A dimension does not fit the coordinate type.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "malformed grid: no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "malformed grid: row {row} has {found} cells, expected {expected}"
            ),
            Self::CellCount { expected, found } => {
                write!(f, "malformed grid: {found} cells, expected {expected}")
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "malformed grid: {rows}x{cols} exceeds coordinate range")
            }
        }
    }
}

impl std::error::Error for GridError {}
