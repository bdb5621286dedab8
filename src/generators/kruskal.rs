use std::rc::Rc;

use super::MazeGenerator;
use crate::maze::{Edge, GridGraph, NodeId};

/// Kruskal's minimum spanning tree, selecting one edge per step.
pub struct Kruskal {
    graph: Rc<GridGraph>,
    /// Edges sorted by weight; ties keep enumeration order.
    edges: Vec<Edge>,
    /// Representative of each node's set. Unions relabel a whole set by linear scan.
    sets: Vec<NodeId>,
    /// Index of the next edge to examine.
    cursor: usize,
    selected: Vec<Edge>,
}

impl Kruskal {
    pub fn new(graph: Rc<GridGraph>) -> Self {
        let mut edges = graph.edges().collect::<Vec<_>>();
        // Stable sort keeps row-major order among equal weights
        edges.sort_by_key(|edge| edge.weight);
        let node_count = graph.node_count();
        Kruskal {
            graph,
            edges,
            sets: (0..node_count).collect(),
            cursor: 0,
            selected: Vec::new(),
        }
    }

    /// Relabel every member of `child` as a member of `parent`.
    fn union(&mut self, parent: NodeId, child: NodeId) {
        self.sets
            .iter_mut()
            .filter(|set| **set == child)
            .for_each(|set| *set = parent);
    }
}

impl MazeGenerator for Kruskal {
    fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        while let Some(&edge) = self.edges.get(self.cursor) {
            self.cursor += 1;
            let (set_u, set_v) = (self.sets[edge.u], self.sets[edge.v]);
            if set_u == set_v {
                continue;
            }
            self.union(set_u, set_v);
            self.selected.push(edge);
            tracing::trace!("[kruskal] selected edge {:?}", edge);
            if self.is_finished() {
                tracing::debug!(
                    "[kruskal] spanning tree complete after examining {} edges",
                    self.cursor
                );
            }
            return;
        }
        // Only reachable on a disconnected graph
        tracing::debug!("[kruskal] ran out of edges before connecting every node");
    }

    fn is_finished(&self) -> bool {
        self.selected.len() + 1 >= self.graph.node_count()
    }

    fn restart(&mut self) {
        self.sets.iter_mut().enumerate().for_each(|(i, s)| *s = i);
        self.cursor = 0;
        self.selected.clear();
    }

    fn selected_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.selected.iter().map(Edge::endpoints).collect()
    }

    fn steps(&self) -> usize {
        self.selected.len()
    }
}
