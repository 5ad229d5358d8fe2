//! Query-batch driver tying the cache, start sampling and playback together.

use std::fmt;
use std::hash::Hash;

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use waypath_core::Position;
use waypath_paths::{AStar, GridMap, PathSearch, SearchError};

use crate::cache::PathCache;
use crate::config::SessionConfig;
use crate::playback::{has_arrived, position_at_step, step_for_frame};
use crate::spawn::sample_start;

/// One roster line: an agent and where it is heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec<K> {
    pub id: K,
    pub target: Position,
    /// Start cell for a newly seen agent. `None` samples one.
    pub start: Option<Position>,
}

impl<K> AgentSpec<K> {
    pub fn new(id: K, target: Position) -> Self {
        Self {
            id,
            target,
            start: None,
        }
    }

    pub fn with_start(mut self, start: Position) -> Self {
        self.start = Some(start);
        self
    }
}

/// Where an agent stands at the queried frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<K> {
    pub id: K,
    pub position: Position,
    /// 0-based step the frame mapped to.
    pub step: usize,
    /// Whether the agent has reached the end of its path.
    pub arrived: bool,
}

/// A maze-solving session: one path cache plus the random source used to
/// place new agents.
///
/// The session never resets itself. Callers decide when a reset is due,
/// typically when [`is_initial_frame`](Self::is_initial_frame) holds.
pub struct Session<K, R, S = AStar> {
    config: SessionConfig,
    cache: PathCache<K, S>,
    rng: R,
}

impl<K: Eq + Hash + fmt::Debug, R: Rng> Session<K, R> {
    /// Create a session that samples starts from `rng`.
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Self::with_search(config, rng, AStar)
    }
}

impl<K: Eq + Hash + fmt::Debug> Session<K, StdRng> {
    /// Create a session with a reproducible start sequence.
    pub fn seeded(config: SessionConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Create a session seeded from `config.seed`, or from the thread RNG
    /// when no seed is configured.
    pub fn from_config(config: SessionConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self::seeded(config, seed)
    }
}

impl<K: Eq + Hash + fmt::Debug, R: Rng, S: PathSearch> Session<K, R, S> {
    /// Create a session that runs `search` on cache misses.
    pub fn with_search(config: SessionConfig, rng: R, search: S) -> Self {
        Self {
            config,
            cache: PathCache::with_search(search),
            rng,
        }
    }

    /// Place every agent in `roster` at `frame`.
    ///
    /// Agents are processed in roster order. A newly seen agent gets its
    /// path searched and cached, starting from its supplied start or a
    /// sampled one; known agents replay their cached path. The first
    /// out-of-bounds endpoint aborts the batch; agents cached before it
    /// stay cached.
    pub fn query(
        &mut self,
        grid: &GridMap,
        frame: i64,
        roster: &[AgentSpec<K>],
    ) -> Result<Vec<Placement<K>>, SearchError>
    where
        K: Clone,
    {
        let step = step_for_frame(frame, self.config.first_frame);
        let mut placements = Vec::with_capacity(roster.len());
        for spec in roster {
            let start = match self.cache.start_used_for(&spec.id) {
                Some(start) => start,
                None => spec.start.unwrap_or_else(|| {
                    sample_start(grid, spec.target, self.config.start_policy, &mut self.rng)
                }),
            };
            let result = self
                .cache
                .get_or_compute(spec.id.clone(), grid, start, spec.target)?;
            placements.push(Placement {
                id: spec.id.clone(),
                position: position_at_step(result, start, step),
                step,
                arrived: has_arrived(result, step),
            });
        }
        Ok(placements)
    }

    /// Drop all cached paths; the next query re-places and re-searches
    /// every agent.
    pub fn reset(&mut self) {
        self.cache.reset();
    }

    /// Whether `frame` is the frame that maps to step 0.
    pub fn is_initial_frame(&self, frame: i64) -> bool {
        frame == self.config.first_frame
    }

    pub fn cache(&self) -> &PathCache<K, S> {
        &self.cache
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
