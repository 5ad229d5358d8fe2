//! Session configuration.

/// How a start cell is chosen for an agent that did not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartPolicy {
    /// Uniform over every walkable cell.
    #[default]
    AnyWalkable,
    /// Uniform over walkable cells with a route to the agent's target.
    /// Falls back to [`StartPolicy::AnyWalkable`] when there are none.
    ReachesTarget,
}

/// Settings for a playback [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// External frame number that maps to step 0.
    pub first_frame: i64,
    pub start_policy: StartPolicy,
    /// Seed for start sampling. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            first_frame: 1,
            start_policy: StartPolicy::AnyWalkable,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_first_frame(mut self, frame: i64) -> Self {
        self.first_frame = frame;
        self
    }

    pub fn with_start_policy(mut self, policy: StartPolicy) -> Self {
        self.start_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
