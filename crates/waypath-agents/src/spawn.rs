//! Random start selection for agents that did not supply one.

use log::debug;
use rand::{Rng, RngExt};
use waypath_core::Position;
use waypath_paths::GridMap;

use crate::config::StartPolicy;

/// Pick a start cell for an agent heading to `target`.
///
/// Candidates are collected in row-major order and one is drawn uniformly
/// with `rng`, so a seeded `rng` always yields the same sequence of starts
/// for the same grids. With no walkable cell at all the origin is returned.
pub fn sample_start(
    grid: &GridMap,
    target: Position,
    policy: StartPolicy,
    rng: &mut impl Rng,
) -> Position {
    let candidates = match policy {
        StartPolicy::AnyWalkable => grid.walkable_positions(),
        StartPolicy::ReachesTarget => {
            let reachable = grid.reachable_from(target);
            if reachable.is_empty() {
                grid.walkable_positions()
            } else {
                reachable
            }
        }
    };
    if candidates.is_empty() {
        debug!("sample_start: no walkable cells, using origin");
        return Position::ZERO;
    }
    let start = candidates[rng.random_range(0..candidates.len())];
    debug!(
        "sample_start: {start} from {} candidates ({policy:?})",
        candidates.len()
    );
    start
}
