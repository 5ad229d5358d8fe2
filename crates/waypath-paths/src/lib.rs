//! Walkability grids and shortest-path search.
//!
//! This crate provides a 4-connected walkability grid ([`GridMap`]) and an
//! A\* shortest-path search over it ([`AStar`], [`find_path`]). Breadth-first
//! utilities on [`GridMap`] give unweighted distance maps and reachability,
//! which double as the reference oracle for search correctness.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | distance estimates for A\* |
//! | [`PathSearch`] | pluggable search over a [`GridMap`] (used by path caches) |

mod astar;
mod bfs;
mod distance;
mod grid;
mod result;
mod state;
mod traits;

pub use astar::{AStar, Endpoint, SearchError, find_path};
pub use distance::manhattan;
pub use grid::{CellState, GridError, GridMap};
pub use result::PathResult;
pub use state::UNREACHABLE;
pub use traits::{AstarPather, PathSearch, Pather, WeightedPather};
