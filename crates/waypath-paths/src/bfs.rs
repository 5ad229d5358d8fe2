use std::collections::VecDeque;

use waypath_core::Position;

use crate::grid::GridMap;
use crate::state::UNREACHABLE;
use crate::traits::Pather;

impl GridMap {
    /// Compute a breadth-first distance map from `source`.
    ///
    /// Each orthogonal step between walkable cells has cost 1. The result is
    /// indexed row-major; cells not reached hold [`UNREACHABLE`]. A blocked
    /// or out-of-bounds source reaches nothing.
    pub fn distance_map(&self, source: Position) -> Vec<i32> {
        let mut dist = vec![UNREACHABLE; self.len()];
        if !self.is_walkable(source) {
            return dist;
        }
        let Some(si) = self.idx(source) else {
            return dist;
        };

        let mut queue: VecDeque<usize> = VecDeque::new();
        dist[si] = 0;
        queue.push_back(si);

        let mut nbuf = Vec::with_capacity(4);

        while let Some(ci) = queue.pop_front() {
            let current_dist = dist[ci];
            let cp = self.position(ci);

            nbuf.clear();
            Pather::neighbors(self, cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if dist[ni] != UNREACHABLE {
                    continue;
                }
                dist[ni] = current_dist + 1;
                queue.push_back(ni);
            }
        }

        dist
    }

    /// Length in steps of a shortest walkable route, or `None` if `to` is
    /// unreachable from `from`.
    pub fn shortest_steps(&self, from: Position, to: Position) -> Option<usize> {
        let ti = self.idx(to)?;
        match self.distance_map(from)[ti] {
            UNREACHABLE => None,
            d => Some(d as usize),
        }
    }

    /// All positions reachable from `source` (including itself), in
    /// row-major order.
    pub fn reachable_from(&self, source: Position) -> Vec<Position> {
        self.distance_map(source)
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != UNREACHABLE)
            .map(|(i, _)| self.position(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_on_corridor() {
        let g = GridMap::from_rows(&[[1u8, 1, 0, 1]]).unwrap();
        assert_eq!(
            g.distance_map(Position::new(0, 0)),
            vec![0, 1, UNREACHABLE, UNREACHABLE]
        );
    }

    #[test]
    fn shortest_steps_and_unreachable() {
        let g = GridMap::from_rows(&[[1u8, 1, 1], [0, 0, 1], [1, 1, 1]]).unwrap();
        assert_eq!(g.shortest_steps(Position::new(0, 0), Position::new(2, 0)), Some(6));
        assert_eq!(g.shortest_steps(Position::new(0, 0), Position::new(0, 0)), Some(0));
        assert_eq!(g.shortest_steps(Position::new(0, 0), Position::new(1, 0)), None);
        assert_eq!(g.shortest_steps(Position::new(0, 0), Position::new(7, 0)), None);
    }

    #[test]
    fn blocked_source_reaches_nothing() {
        let g = GridMap::from_rows(&[[0u8, 1], [1, 1]]).unwrap();
        assert!(g.reachable_from(Position::new(0, 0)).is_empty());
        assert!(g.reachable_from(Position::new(-3, 0)).is_empty());
    }

    #[test]
    fn reachable_component() {
        let g = GridMap::from_rows(&[[1u8, 0, 1], [1, 0, 1]]).unwrap();
        assert_eq!(
            g.reachable_from(Position::new(0, 2)),
            vec![Position::new(0, 2), Position::new(1, 2)]
        );
    }
}
