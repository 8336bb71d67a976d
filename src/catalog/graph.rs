//! Undirected, unweighted relation graph over a fixed number of slots.
//!
//! Adjacency is stored as one small vector of neighbors per slot, in edge
//! insertion order. That order is the BFS visitation order, which makes
//! path results deterministic for a given sequence of `add_edge` calls.

use std::collections::VecDeque;
use smallvec::SmallVec;

use crate::model::{Route, SlotId};

/// Neighbor list. Most exhibits touch only a handful of others.
type Neighbors = SmallVec<[SlotId; 4]>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationGraph {
    adjacency: Vec<Neighbors>,
    edges: usize,
}

impl RelationGraph {
    /// A graph with `vertices` isolated slots.
    pub fn new(vertices: usize) -> Self {
        Self {
            adjacency: vec![Neighbors::new(); vertices],
            edges: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        slot.0 < self.adjacency.len()
    }

    /// Neighbors of `slot` in insertion order. Empty for out-of-range slots.
    pub fn neighbors(&self, slot: SlotId) -> &[SlotId] {
        self.adjacency.get(slot.0).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn has_edge(&self, a: SlotId, b: SlotId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Insert the undirected edge `a – b`. Returns `false` if it already
    /// existed. Callers guarantee both slots are in range.
    pub(crate) fn add_edge(&mut self, a: SlotId, b: SlotId) -> bool {
        debug_assert!(self.contains(a) && self.contains(b));
        if self.has_edge(a, b) {
            return false;
        }
        self.adjacency[a.0].push(b);
        if a != b {
            self.adjacency[b.0].push(a);
        }
        self.edges += 1;
        true
    }

    /// Breadth-first search from `start` to `goal`.
    ///
    /// Each vertex keeps the first predecessor that discovered it. Returns
    /// the walk source-first, `[start]` when `start == goal`, and an empty
    /// route when `goal` is not reachable.
    pub fn bfs(&self, start: SlotId, goal: SlotId) -> Route {
        if !self.contains(start) || !self.contains(goal) {
            return Route::empty();
        }
        if start == goal {
            return Route::single(start);
        }

        let n = self.vertex_count();
        let mut predecessor: Vec<Option<SlotId>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::with_capacity(n);

        visited[start.0] = true;
        queue.push_back(start);

        while let Some(u) = queue.pop_front() {
            if u == goal {
                break;
            }
            for &v in self.neighbors(u) {
                if !visited[v.0] {
                    visited[v.0] = true;
                    predecessor[v.0] = Some(u);
                    queue.push_back(v);
                }
            }
        }

        if !visited[goal.0] {
            return Route::empty();
        }

        let mut stops = vec![goal];
        let mut at = goal;
        while let Some(prev) = predecessor[at.0] {
            stops.push(prev);
            at = prev;
        }
        stops.reverse();
        Route::from_stops(stops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(route: &Route) -> Vec<usize> {
        route.stops().iter().map(|s| s.0).collect()
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut g = RelationGraph::new(3);
        assert!(g.add_edge(SlotId(0), SlotId(2)));
        assert!(g.has_edge(SlotId(0), SlotId(2)));
        assert!(g.has_edge(SlotId(2), SlotId(0)));
        assert!(!g.has_edge(SlotId(0), SlotId(1)));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = RelationGraph::new(2);
        assert!(g.add_edge(SlotId(0), SlotId(1)));
        assert!(!g.add_edge(SlotId(1), SlotId(0)));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors(SlotId(0)), &[SlotId(1)]);
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut g = RelationGraph::new(2);
        assert!(g.add_edge(SlotId(1), SlotId(1)));
        assert_eq!(g.neighbors(SlotId(1)), &[SlotId(1)]);
        assert_eq!(ids(&g.bfs(SlotId(1), SlotId(1))), vec![1]);
        assert!(g.bfs(SlotId(1), SlotId(0)).is_empty());
    }

    #[test]
    fn test_bfs_chain() {
        // 0 - 4 - 1 - 2 - 3
        let mut g = RelationGraph::new(6);
        g.add_edge(SlotId(4), SlotId(0));
        g.add_edge(SlotId(4), SlotId(1));
        g.add_edge(SlotId(1), SlotId(2));
        g.add_edge(SlotId(2), SlotId(3));

        assert_eq!(ids(&g.bfs(SlotId(0), SlotId(3))), vec![0, 4, 1, 2, 3]);
        assert_eq!(ids(&g.bfs(SlotId(3), SlotId(0))), vec![3, 2, 1, 4, 0]);
        assert!(g.bfs(SlotId(0), SlotId(5)).is_empty());
    }

    #[test]
    fn test_bfs_prefers_fewest_hops() {
        // Long way 0-1-2-3 and a shortcut 0-3.
        let mut g = RelationGraph::new(4);
        g.add_edge(SlotId(0), SlotId(1));
        g.add_edge(SlotId(1), SlotId(2));
        g.add_edge(SlotId(2), SlotId(3));
        g.add_edge(SlotId(0), SlotId(3));
        assert_eq!(ids(&g.bfs(SlotId(0), SlotId(3))), vec![0, 3]);
    }

    #[test]
    fn test_bfs_first_discovered_predecessor() {
        // Diamond: 0-1, 0-2, 1-3, 2-3. Slot 1 is discovered first.
        let mut g = RelationGraph::new(4);
        g.add_edge(SlotId(0), SlotId(1));
        g.add_edge(SlotId(0), SlotId(2));
        g.add_edge(SlotId(1), SlotId(3));
        g.add_edge(SlotId(2), SlotId(3));
        assert_eq!(ids(&g.bfs(SlotId(0), SlotId(3))), vec![0, 1, 3]);
    }

    #[test]
    fn test_bfs_out_of_range() {
        let g = RelationGraph::new(2);
        assert!(g.bfs(SlotId(0), SlotId(9)).is_empty());
        assert!(g.neighbors(SlotId(9)).is_empty());
    }
}
