use std::collections::BinaryHeap;

use waypath_core::{Position, Range};

/// Sentinel value meaning "unreachable" in g-scores and BFS distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Per-cell search record
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Best known cost from the start.
    pub(crate) g: i32,
    /// Predecessor index on the best known path; `usize::MAX` for none.
    pub(crate) parent: usize,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            parent: usize::MAX,
            closed: false,
        }
    }
}

/// Open-set entry, ordered by `f` then by insertion order, for use in
/// `BinaryHeap`.
///
/// Entries are never updated in place: an improved g-score pushes a new
/// entry, and the outdated one is skipped when popped.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) g: i32,
    pub(crate) f: i32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the earliest pushed.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Scratch state for a single A* run over a grid rectangle.
///
/// Holds the open set, the per-cell g-scores, backpointers and closed
/// flags. Created at the start of a search and dropped when it returns.
pub(crate) struct SearchState {
    bounds: Range,
    width: usize,
    pub(crate) nodes: Vec<Node>,
    open: BinaryHeap<NodeRef>,
    seq: u64,
    /// Number of positions closed so far.
    pub(crate) expanded: usize,
}

impl SearchState {
    pub(crate) fn new(bounds: Range) -> Self {
        Self {
            bounds,
            width: bounds.cols().max(0) as usize,
            nodes: vec![Node::default(); bounds.len()],
            open: BinaryHeap::new(),
            seq: 0,
            expanded: 0,
        }
    }

    /// Record `g` as the best cost to `idx` via `parent` and queue it with
    /// priority `f`.
    pub(crate) fn relax(&mut self, idx: usize, parent: usize, g: i32, f: i32) {
        let n = &mut self.nodes[idx];
        n.g = g;
        n.parent = parent;
        self.open.push(NodeRef {
            idx,
            g,
            f,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Pop the next live open entry, skipping closed and outdated ones.
    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        while let Some(entry) = self.open.pop() {
            let n = &self.nodes[entry.idx];
            if n.closed || entry.g != n.g {
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Mark `idx` as finalized.
    pub(crate) fn close(&mut self, idx: usize) {
        self.nodes[idx].closed = true;
        self.expanded += 1;
    }

    /// Follow backpointers from `goal` and return the path start → goal.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Position> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Position` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Position) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let col = (p.col - self.bounds.min.col) as usize;
        let row = (p.row - self.bounds.min.row) as usize;
        Some(row * self.width + col)
    }

    /// Convert a flat index back to a `Position`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Position {
        let col = (idx % self.width) as i32 + self.bounds.min.col;
        let row = (idx / self.width) as i32 + self.bounds.min.row;
        Position::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_f_then_fifo() {
        let mut st = SearchState::new(Range::with_size(1, 4));
        st.relax(0, usize::MAX, 0, 5);
        st.relax(1, 0, 1, 3);
        st.relax(2, 0, 1, 3);
        st.relax(3, 0, 1, 4);
        let order: Vec<usize> = std::iter::from_fn(|| st.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn outdated_entries_are_skipped() {
        let mut st = SearchState::new(Range::with_size(1, 2));
        st.relax(1, usize::MAX, 5, 5);
        // A better route to the same cell supersedes the first entry.
        st.relax(1, 0, 2, 6);
        let first = st.pop().unwrap();
        assert_eq!((first.idx, first.g), (1, 2));
        assert!(st.pop().is_none());
    }

    #[test]
    fn closed_entries_are_skipped() {
        let mut st = SearchState::new(Range::with_size(1, 2));
        st.relax(0, usize::MAX, 0, 0);
        st.close(0);
        assert!(st.pop().is_none());
        assert_eq!(st.expanded, 1);
    }

    #[test]
    fn idx_point_with_offset_range() {
        let st = SearchState::new(Range::new(2, 3, 5, 7));
        let p = Position::new(4, 5);
        let i = st.idx(p).unwrap();
        assert_eq!(i, 2 * 4 + 2);
        assert_eq!(st.point(i), p);
        assert_eq!(st.idx(Position::new(0, 0)), None);
    }

    #[test]
    fn reconstruct_follows_parents() {
        let mut st = SearchState::new(Range::with_size(1, 3));
        st.relax(0, usize::MAX, 0, 0);
        st.relax(1, 0, 1, 1);
        st.relax(2, 1, 2, 2);
        assert_eq!(
            st.reconstruct(2),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }
}
