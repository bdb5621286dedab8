use rand::Rng;

pub type NodeId = usize;
pub type Weight = u32;

/// Undirected weighted edge between two grid nodes, with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    pub weight: Weight,
}

impl Edge {
    /// The edge without its weight, as drawn by the renderer.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.u, self.v)
    }
}

/// Weighted 4-connected grid of `x_count * y_count` nodes, indexed row-major.
///
/// Each node stores the weight of the edge to its right neighbor and to the neighbor below;
/// `None` marks the missing edges past the last column or row.
#[derive(Debug, Clone)]
pub struct GridGraph {
    right: Box<[Option<Weight>]>,
    down: Box<[Option<Weight>]>,
    x_count: usize,
    y_count: usize,
}

impl GridGraph {
    /// Builds a grid whose edge weights are drawn uniformly from `1..=max_cost`.
    pub fn build<R: Rng>(
        x_count: usize,
        y_count: usize,
        max_cost: Weight,
        rng: &mut R,
    ) -> Self {
        let max_cost = max_cost.max(1);
        Self::from_fn(x_count, y_count, |_, _| rng.random_range(1..=max_cost))
    }

    /// Builds a grid where every edge has the same weight.
    pub fn uniform(x_count: usize, y_count: usize, weight: Weight) -> Self {
        Self::from_fn(x_count, y_count, |_, _| weight)
    }

    /// Builds a grid, asking `weight_of(u, v)` for the weight of every edge in row-major order.
    pub fn from_fn<F>(x_count: usize, y_count: usize, mut weight_of: F) -> Self
    where
        F: FnMut(NodeId, NodeId) -> Weight,
    {
        let node_count = x_count * y_count;
        let mut right = vec![None; node_count].into_boxed_slice();
        let mut down = vec![None; node_count].into_boxed_slice();
        for y in 0..y_count {
            for x in 0..x_count {
                let node = y * x_count + x;
                if x + 1 < x_count {
                    right[node] = Some(weight_of(node, node + 1));
                }
                if y + 1 < y_count {
                    down[node] = Some(weight_of(node, node + x_count));
                }
            }
        }
        GridGraph {
            right,
            down,
            x_count,
            y_count,
        }
    }

    /// Returns the number of nodes per row.
    pub fn x_count(&self) -> usize {
        self.x_count
    }

    /// Returns the number of node rows.
    pub fn y_count(&self) -> usize {
        self.y_count
    }

    pub fn node_count(&self) -> usize {
        self.x_count * self.y_count
    }

    /// Returns the weight of the edge between `a` and `b`, or `None` if they are not adjacent.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        let (u, v) = if a < b { (a, b) } else { (b, a) };
        if v >= self.node_count() {
            return None;
        }
        if v == u + 1 && v % self.x_count != 0 {
            self.right[u]
        } else if v == u + self.x_count {
            self.down[u]
        } else {
            None
        }
    }

    /// Get the neighbors of a node together with the weight of the connecting edge.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        let x = self.x_count;
        [
            node.checked_sub(x).and_then(|n| self.down[n].map(|w| (n, w))),
            (node % x != 0).then(|| self.right[node - 1].map(|w| (node - 1, w))).flatten(),
            self.right[node].map(|w| (node + 1, w)),
            self.down[node].map(|w| (node + x, w)),
        ]
        .into_iter()
        .flatten()
    }

    /// Enumerates every edge once, row-major by its smaller node; for a given node the edge to
    /// the right comes before the edge below.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.node_count()).flat_map(move |u| {
            [
                self.right[u].map(|weight| Edge {
                    u,
                    v: u + 1,
                    weight,
                }),
                self.down[u].map(|weight| Edge {
                    u,
                    v: u + self.x_count,
                    weight,
                }),
            ]
            .into_iter()
            .flatten()
        })
    }

    /// Number of edges in an `x_count` by `y_count` lattice.
    pub fn edge_count(&self) -> usize {
        self.x_count * self.y_count.saturating_sub(1) + self.y_count * self.x_count.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_edges_are_row_major() {
        let graph = GridGraph::uniform(3, 2, 1);
        let edges = graph.edges().map(|e| e.endpoints()).collect::<Vec<_>>();
        assert_eq!(
            edges,
            vec![(0, 1), (0, 3), (1, 2), (1, 4), (2, 5), (3, 4), (4, 5)]
        );
        assert_eq!(edges.len(), graph.edge_count());
    }

    #[test]
    fn test_weights_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = GridGraph::build(6, 5, 4, &mut rng);
        assert_eq!(graph.edges().count(), 6 * 4 + 5 * 5);
        assert!(graph.edges().all(|e| (1..=4).contains(&e.weight)));
    }

    #[test]
    fn test_weight_lookup_is_symmetric() {
        let graph = GridGraph::from_fn(4, 4, |u, v| (u * 10 + v) as Weight);
        for edge in graph.edges() {
            assert_eq!(graph.weight(edge.u, edge.v), Some(edge.weight));
            assert_eq!(graph.weight(edge.v, edge.u), Some(edge.weight));
        }
        // Last node of a row is not adjacent to the first node of the next row
        assert_eq!(graph.weight(3, 4), None);
        assert_eq!(graph.weight(0, 5), None);
        assert_eq!(graph.weight(0, 0), None);
    }

    #[test]
    fn test_neighbors() {
        let graph = GridGraph::from_fn(3, 3, |u, v| (u + v) as Weight);
        let center = graph.neighbors(4).collect::<Vec<_>>();
        assert_eq!(center, vec![(1, 5), (3, 7), (5, 9), (7, 11)]);
        let corner = graph.neighbors(0).collect::<Vec<_>>();
        assert_eq!(corner, vec![(1, 1), (3, 3)]);
        let row_end = graph.neighbors(5).map(|(n, _)| n).collect::<Vec<_>>();
        assert_eq!(row_end, vec![2, 4, 8]);
    }

    #[test]
    fn test_single_node() {
        let graph = GridGraph::uniform(1, 1, 1);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edges().count(), 0);
        assert_eq!(graph.neighbors(0).count(), 0);
    }
}
