//! Geometry primitives: [`Position`] and [`Range`].
//!
//! Grid coordinates are `(row, col)`: rows grow downward, columns grow to
//! the right. Both types are plain values with structural equality, so they
//! can be used freely as map and set keys.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell coordinate on a 2D grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Grid origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Unit offsets in neighbor order: up, down, left, right.
    pub const CARDINAL: [Position; 4] = [
        Self::new(-1, 0),
        Self::new(1, 0),
        Self::new(0, -1),
        Self::new(0, 1),
    ];

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Like [`shift`](Self::shift), but `None` if either coordinate would
    /// overflow.
    #[inline]
    pub const fn checked_shift(self, drow: i32, dcol: i32) -> Option<Self> {
        match (self.row.checked_add(drow), self.col.checked_add(dcol)) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }

    /// The orthogonal neighbours, in the fixed order up, down, left, right.
    /// No bounds filtering is applied; neighbours past the `i32` limits are
    /// left out.
    #[inline]
    pub fn neighbors_4(self) -> impl Iterator<Item = Position> {
        Self::CARDINAL
            .into_iter()
            .filter_map(move |d| self.checked_shift(d.row, d.col))
    }

    /// Whether `other` is exactly one orthogonal unit step away.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle of positions \[min, max). `min` is inclusive,
/// `max` is exclusive on both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Position,
    pub max: Position,
}

impl Range {
    /// Create a new range from two corners and canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(row0: i32, col0: i32, row1: i32, col1: i32) -> Self {
        Self {
            min: Position::new(row0.min(row1), col0.min(col1)),
            max: Position::new(row0.max(row1), col0.max(col1)),
        }
    }

    /// Range anchored at the origin covering `rows` × `cols` cells.
    #[inline]
    pub fn with_size(rows: i32, cols: i32) -> Self {
        Self::new(0, 0, rows, cols)
    }

    /// Number of rows, saturating at `i32::MAX`.
    #[inline]
    pub fn rows(self) -> i32 {
        self.max.row.saturating_sub(self.min.row)
    }

    /// Number of columns, saturating at `i32::MAX`.
    #[inline]
    pub fn cols(self) -> i32 {
        self.max.col.saturating_sub(self.min.col)
    }

    /// Total number of cells in the range, saturating at `usize::MAX`.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let rows = self.max.row.abs_diff(self.min.row) as usize;
        let cols = self.max.col.abs_diff(self.min.col) as usize;
        rows.saturating_mul(cols)
    }

    /// Whether the range has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.row >= self.max.row || self.min.col >= self.max.col
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.row >= self.min.row && p.row < self.max.row && p.col >= self.min.col && p.col < self.max.col
    }

    /// Row-major iterator over every position in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Position;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the positions in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Position,
}

impl Iterator for RangeIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        if self.cur.row >= self.range.max.row || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.range.max.col {
            self.cur.col = self.range.min.col;
            self.cur.row += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.row >= self.range.max.row {
            return (0, Some(0));
        }
        let w = self.range.max.col.abs_diff(self.range.min.col) as usize;
        let remaining_in_row = self.range.max.col.abs_diff(self.cur.col) as usize;
        let remaining_rows = (self.range.max.row.abs_diff(self.cur.row) - 1) as usize;
        match remaining_rows
            .checked_mul(w)
            .and_then(|n| n.checked_add(remaining_in_row))
        {
            Some(total) => (total, Some(total)),
            None => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn position_arithmetic() {
        let a = Position::new(1, 2);
        let b = Position::new(3, 4);
        assert_eq!(a + b, Position::new(4, 6));
        assert_eq!(b - a, Position::new(2, 2));
        assert_eq!(a.shift(-1, 3), Position::new(0, 5));
    }

    #[test]
    fn neighbors_are_up_down_left_right() {
        let p = Position::new(5, 5);
        assert_eq!(
            p.neighbors_4().collect::<Vec<_>>(),
            vec![
                Position::new(4, 5),
                Position::new(6, 5),
                Position::new(5, 4),
                Position::new(5, 6),
            ]
        );
        assert!(p.neighbors_4().all(|n| p.is_adjacent(n)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(6, 6)));
    }

    #[test]
    fn neighbors_at_i32_limits_skip_overflow() {
        let p = Position::new(i32::MAX, i32::MIN);
        assert_eq!(
            p.neighbors_4().collect::<Vec<_>>(),
            vec![Position::new(i32::MAX - 1, i32::MIN), Position::new(i32::MAX, i32::MIN + 1)]
        );
        assert_eq!(Position::new(i32::MIN, 0).checked_shift(-1, 0), None);
        assert_eq!(Position::new(0, i32::MAX).checked_shift(0, 1), None);
        assert_eq!(Position::new(1, 1).checked_shift(-1, 2), Some(Position::new(0, 3)));
        assert!(!Position::new(i32::MIN, 0).is_adjacent(Position::new(i32::MAX, 0)));
    }

    #[test]
    fn position_orders_row_major() {
        let mut v = vec![
            Position::new(1, 0),
            Position::new(0, 3),
            Position::new(0, 1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![Position::new(0, 1), Position::new(0, 3), Position::new(1, 0)]
        );
    }

    #[test]
    fn position_as_set_key() {
        let set: HashSet<Position> = [(0, 0), (0, 0), (2, 1)]
            .into_iter()
            .map(Position::from)
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Position::new(2, 1)));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(3, -1).to_string(), "(3, -1)");
    }

    #[test]
    fn range_basics() {
        let r = Range::with_size(2, 3);
        assert_eq!(r.rows(), 2);
        assert_eq!(r.cols(), 3);
        assert_eq!(r.len(), 6);
        assert!(!r.is_empty());
        assert!(r.contains(Position::new(0, 0)));
        assert!(r.contains(Position::new(1, 2)));
        assert!(!r.contains(Position::new(2, 0)));
        assert!(!r.contains(Position::new(0, 3)));
        assert!(!r.contains(Position::new(-1, 0)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = Range::new(3, 2, 0, 0);
        assert_eq!(r.min, Position::new(0, 0));
        assert_eq!(r.max, Position::new(3, 2));
    }

    #[test]
    fn range_iter_is_row_major() {
        let r = Range::with_size(2, 3);
        let pts: Vec<_> = r.iter().collect();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Position::new(0, 0));
        assert_eq!(pts[2], Position::new(0, 2));
        assert_eq!(pts[3], Position::new(1, 0));
        assert_eq!(pts[5], Position::new(1, 2));
        assert_eq!(r.iter().len(), 6);
    }

    #[test]
    fn extreme_range_sizes_saturate() {
        let r = Range::new(i32::MIN, 0, i32::MAX, 3);
        assert_eq!(r.rows(), i32::MAX);
        assert_eq!(r.cols(), 3);
        assert_eq!(r.len(), (u32::MAX as usize).saturating_mul(3));
        assert!(r.contains(Position::new(i32::MIN, 2)));
        assert!(!r.contains(Position::new(i32::MAX, 0)));
        let full = Range::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(full.rows(), i32::MAX);
        assert_eq!(full.cols(), i32::MAX);
        let _ = full.iter().size_hint();
    }

    #[test]
    fn empty_range_iter() {
        let r = Range::new(0, 0, 0, 4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
