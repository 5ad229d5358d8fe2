//! **waypath-core**: core types for grid pathfinding and path playback.
//!
//! This crate provides the geometry primitives shared across the *waypath*
//! crates: cell coordinates ([`Position`]) and half-open rectangles of
//! cells ([`Range`]).

pub mod geom;

pub use geom::{Position, Range, RangeIter};
