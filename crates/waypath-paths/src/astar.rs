use std::fmt;

use log::{debug, trace};
use waypath_core::{Position, Range};

use crate::grid::GridMap;
use crate::result::PathResult;
use crate::state::SearchState;
use crate::traits::{AstarPather, PathSearch};

/// A* shortest-path search.
///
/// Stateless: every call builds its own open set, g-scores and backpointers
/// and discards them on return, so one `AStar` can serve any number of
/// grids and agents.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl AStar {
    /// Compute a shortest path from `from` to `to` over any [`AstarPather`]
    /// whose positions lie in `bounds`.
    ///
    /// Returns the full path (including both endpoints), or `NotFound` if
    /// no path exists within `bounds`. Ties between equal f-scores are
    /// expanded in the order they were queued.
    ///
    /// The endpoints themselves are not checked against the pather; callers
    /// go through [`PathSearch::find_path`], which rejects blocked ones.
    pub(crate) fn path<P: AstarPather>(
        &self,
        pather: &P,
        bounds: Range,
        from: Position,
        to: Position,
    ) -> PathResult {
        let mut state = SearchState::new(bounds);
        let (Some(start_idx), Some(goal_idx)) = (state.idx(from), state.idx(to)) else {
            return PathResult::NotFound;
        };

        if start_idx == goal_idx {
            return PathResult::Found(vec![from]);
        }

        state.relax(start_idx, usize::MAX, 0, pather.estimate(from, to));

        let mut nbuf = Vec::with_capacity(4);

        let found = 'search: loop {
            let Some(current) = state.pop() else {
                break 'search false;
            };

            let ci = current.idx;
            if ci == goal_idx {
                break 'search true;
            }

            state.close(ci);
            let current_point = state.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = state.idx(np) else {
                    continue;
                };
                let n = &state.nodes[ni];
                if n.closed {
                    continue;
                }
                let tentative_g = current.g + pather.cost(current_point, np);
                if tentative_g >= n.g {
                    continue;
                }
                let f = tentative_g + pather.estimate(np, to);
                state.relax(ni, ci, tentative_g, f);
            }
        };

        if !found {
            debug!(
                "astar: no path {from} -> {to} after expanding {} nodes",
                state.expanded
            );
            return PathResult::NotFound;
        }

        let path = state.reconstruct(goal_idx);
        debug!(
            "astar: path {from} -> {to} with {} steps, expanded {} nodes",
            path.len() - 1,
            state.expanded
        );
        PathResult::Found(path)
    }
}

impl PathSearch for AStar {
    /// Endpoints outside the grid fail with [`SearchError::InvalidEndpoint`].
    /// A blocked start or target yields `NotFound`.
    fn find_path(
        &self,
        grid: &GridMap,
        start: Position,
        target: Position,
    ) -> Result<PathResult, SearchError> {
        trace!("find_path: start={start} target={target}");
        let bounds = grid.bounds();
        let endpoints = [(Endpoint::Start, start), (Endpoint::Target, target)];
        if let Some(&(endpoint, pos)) = endpoints.iter().find(|(_, p)| !bounds.contains(*p)) {
            debug!("find_path: {endpoint} {pos} outside {bounds}");
            return Err(SearchError::InvalidEndpoint {
                endpoint,
                pos,
                bounds,
            });
        }
        if let Some((endpoint, pos)) = endpoints.iter().find(|(_, p)| !grid.is_walkable(*p)) {
            debug!("find_path: {endpoint} {pos} is blocked");
            return Ok(PathResult::NotFound);
        }
        Ok(self.path(grid, bounds, start, target))
    }
}

/// Search `grid` for a shortest path from `start` to `target` with [`AStar`].
pub fn find_path(
    grid: &GridMap,
    start: Position,
    target: Position,
) -> Result<PathResult, SearchError> {
    AStar.find_path(grid, start, target)
}

/// Which end of a search an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors that can occur when starting a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the grid.
    InvalidEndpoint {
        endpoint: Endpoint,
        pos: Position,
        bounds: Range,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint {
                endpoint,
                pos,
                bounds,
            } => write!(f, "invalid {endpoint} {pos}: outside grid {bounds}"),
        }
    }
}

impl std::error::Error for SearchError {}
