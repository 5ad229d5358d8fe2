//! Multi-agent path caching and frame-indexed playback.
//!
//! Each agent's path is searched once and cached by agent id
//! ([`PathCache`]); later queries replay the cached path at an external
//! frame counter ([`position_at_step`]). [`Session`] drives a whole roster
//! per query and samples start cells for agents that did not supply one.

pub mod cache;
pub mod config;
pub mod playback;
pub mod session;
pub mod spawn;

pub use cache::{AgentEntry, PathCache};
pub use config::{SessionConfig, StartPolicy};
pub use playback::{has_arrived, position_at_step, step_for_frame};
pub use session::{AgentSpec, Placement, Session};
pub use spawn::sample_start;
