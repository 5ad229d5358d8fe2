use waypath_core::Position;

use crate::astar::SearchError;
use crate::grid::GridMap;
use crate::result::PathResult;

/// Minimal pathfinding interface: neighbor enumeration only.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Position, to: Position) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Position, to: Position) -> i32;
}

/// A shortest-path routine over a [`GridMap`].
///
/// Path caches are generic over this trait so that the search they run can
/// be swapped or instrumented.
pub trait PathSearch {
    /// Search for a path from `start` to `target`.
    ///
    /// Endpoints outside the grid are an error; an unreachable target is a
    /// normal [`PathResult::NotFound`].
    fn find_path(
        &self,
        grid: &GridMap,
        start: Position,
        target: Position,
    ) -> Result<PathResult, SearchError>;
}
