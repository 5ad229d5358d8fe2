//! Per-agent path cache.
//!
//! Each agent's path is searched once and then served from the cache on
//! every later query, until [`PathCache::reset`] drops all entries. Entries
//! are keyed purely by agent id: a cached agent keeps its path even if the
//! grid, start or target passed later differ. A grid change therefore needs
//! an explicit reset.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

use log::{debug, info, trace};
use waypath_core::Position;
use waypath_paths::{AStar, GridMap, PathResult, PathSearch, SearchError};

/// The cached search for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentEntry {
    /// Start position the search ran from.
    pub start: Position,
    /// Target position the search ran to.
    pub target: Position,
    pub result: PathResult,
}

/// Map from agent id to its cached [`AgentEntry`].
///
/// `S` is the search routine run on a cache miss.
#[derive(Debug)]
pub struct PathCache<K, S = AStar> {
    entries: HashMap<K, AgentEntry>,
    search: S,
}

impl<K: Eq + Hash + fmt::Debug> PathCache<K> {
    /// Create an empty cache backed by [`AStar`].
    pub fn new() -> Self {
        Self::with_search(AStar)
    }
}

impl<K: Eq + Hash + fmt::Debug> Default for PathCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + fmt::Debug, S: PathSearch> PathCache<K, S> {
    /// Create an empty cache that runs `search` on misses.
    pub fn with_search(search: S) -> Self {
        Self {
            entries: HashMap::new(),
            search,
        }
    }

    /// Return the cached result for `agent`, searching and storing it first
    /// if the agent has no entry.
    ///
    /// On a hit, `grid`, `start` and `target` are ignored. A failed search
    /// (out-of-bounds endpoint) stores nothing.
    pub fn get_or_compute(
        &mut self,
        agent: K,
        grid: &GridMap,
        start: Position,
        target: Position,
    ) -> Result<&PathResult, SearchError> {
        match self.entries.entry(agent) {
            Entry::Occupied(e) => {
                trace!("path cache hit for {:?}", e.key());
                Ok(&e.into_mut().result)
            }
            Entry::Vacant(e) => {
                debug!("path cache miss for {:?}: {start} -> {target}", e.key());
                let result = self.search.find_path(grid, start, target)?;
                let entry = e.insert(AgentEntry {
                    start,
                    target,
                    result,
                });
                Ok(&entry.result)
            }
        }
    }

    /// Drop every cached entry. Every later [`get_or_compute`] searches
    /// again.
    ///
    /// [`get_or_compute`]: Self::get_or_compute
    pub fn reset(&mut self) {
        info!("path cache reset, dropping {} entries", self.entries.len());
        self.entries.clear();
    }

    /// The start position recorded for `agent`, or `None` if uncached.
    pub fn start_used_for(&self, agent: &K) -> Option<Position> {
        self.entries.get(agent).map(|e| e.start)
    }

    /// The full cached entry for `agent`.
    pub fn entry(&self, agent: &K) -> Option<&AgentEntry> {
        self.entries.get(agent)
    }

    pub fn contains(&self, agent: &K) -> bool {
        self.entries.contains_key(agent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over cached `(agent, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &AgentEntry)> {
        self.entries.iter()
    }

    /// The search routine run on misses.
    pub fn searcher(&self) -> &S {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Wraps [`AStar`] and counts invocations.
    #[derive(Default)]
    struct CountingSearch {
        calls: Cell<usize>,
    }

    impl PathSearch for CountingSearch {
        fn find_path(
            &self,
            grid: &GridMap,
            start: Position,
            target: Position,
        ) -> Result<PathResult, SearchError> {
            self.calls.set(self.calls.get() + 1);
            AStar.find_path(grid, start, target)
        }
    }

    fn maze() -> GridMap {
        GridMap::from_rows(&[
            [1u8, 1, 1, 0, 1],
            [0, 0, 1, 0, 1],
            [1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0],
            [1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn computes_once_per_agent() {
        let g = maze();
        let mut cache = PathCache::with_search(CountingSearch::default());
        let first = cache
            .get_or_compute("npc_1", &g, pos(0, 0), pos(4, 4))
            .unwrap()
            .clone();
        let second = cache
            .get_or_compute("npc_1", &g, pos(0, 0), pos(4, 4))
            .unwrap()
            .clone();
        assert_eq!(cache.searcher().calls.get(), 1);
        assert_eq!(first, second);
        assert!(first.is_found());
    }

    #[test]
    fn hit_ignores_new_inputs() {
        let g = maze();
        let mut cache = PathCache::new();
        let original = cache
            .get_or_compute(1u32, &g, pos(0, 0), pos(4, 4))
            .unwrap()
            .clone();
        let other = GridMap::from_rows(&[[1u8; 5]; 5]).unwrap();
        let again = cache.get_or_compute(1u32, &other, pos(4, 0), pos(0, 4)).unwrap();
        assert_eq!(*again, original);
        assert_eq!(cache.start_used_for(&1), Some(pos(0, 0)));
        assert_eq!(cache.entry(&1).map(|e| e.target), Some(pos(4, 4)));
    }

    #[test]
    fn reset_forces_recompute() {
        let g = maze();
        let mut cache = PathCache::with_search(CountingSearch::default());
        cache.get_or_compute("a", &g, pos(0, 0), pos(4, 4)).unwrap();
        cache.get_or_compute("b", &g, pos(2, 4), pos(4, 4)).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.searcher().calls.get(), 2);

        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.start_used_for(&"a"), None);

        cache.get_or_compute("a", &g, pos(0, 0), pos(4, 4)).unwrap();
        assert_eq!(cache.searcher().calls.get(), 3);
    }

    #[test]
    fn agents_are_independent() {
        let g = maze();
        let mut cache = PathCache::with_search(CountingSearch::default());
        cache.get_or_compute("a", &g, pos(0, 0), pos(4, 4)).unwrap();
        cache.get_or_compute("b", &g, pos(0, 0), pos(4, 4)).unwrap();
        assert_eq!(cache.searcher().calls.get(), 2);
        let mut ids: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn not_found_is_cached() {
        let g = maze();
        let mut cache = PathCache::with_search(CountingSearch::default());
        let r = cache.get_or_compute("a", &g, pos(0, 0), pos(1, 0)).unwrap();
        assert_eq!(*r, PathResult::NotFound);
        cache.get_or_compute("a", &g, pos(0, 0), pos(1, 0)).unwrap();
        assert_eq!(cache.searcher().calls.get(), 1);
        assert_eq!(cache.start_used_for(&"a"), Some(pos(0, 0)));
    }

    #[test]
    fn invalid_endpoint_is_not_cached() {
        let g = maze();
        let mut cache: PathCache<&str> = PathCache::new();
        assert!(cache.get_or_compute("a", &g, pos(0, 0), pos(5, 5)).is_err());
        assert!(!cache.contains(&"a"));
    }
}
