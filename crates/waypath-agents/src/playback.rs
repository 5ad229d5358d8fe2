//! Frame-indexed playback of cached paths.
//!
//! A path is replayed one cell per step. Once the step index runs past the
//! end of the path the agent holds at its final cell; an agent without a
//! path holds at its start.

use waypath_core::Position;
use waypath_paths::PathResult;

/// Position an agent occupies at 0-based `step` along `result`.
///
/// Steps past the end clamp to the last cell. `NotFound` (or an empty path)
/// yields `start_fallback`.
pub fn position_at_step(result: &PathResult, start_fallback: Position, step: usize) -> Position {
    match result.path() {
        Some(path) if !path.is_empty() => path[step.min(path.len() - 1)],
        _ => start_fallback,
    }
}

/// Whether the agent has reached the end of its path by `step`.
///
/// An agent without a path (`NotFound` or an empty path) never arrives,
/// matching the start fallback of [`position_at_step`].
pub fn has_arrived(result: &PathResult, step: usize) -> bool {
    result
        .path()
        .and_then(|path| path.len().checked_sub(1))
        .is_some_and(|last| step >= last)
}

/// Map an external frame number to a 0-based step, given the frame that
/// counts as step 0. Frames before `first_frame` clamp to step 0.
pub fn step_for_frame(frame: i64, first_frame: i64) -> usize {
    usize::try_from(frame.saturating_sub(first_frame)).unwrap_or(0)
}
