use crate::maze::NodeId;

/// Disjoint sets with path compression and union by rank.
///
/// The step engines keep their own flat representative arrays so every union is visible
/// to the renderer; this structure is used to check finished results.
pub struct UnionFind {
    parent: Vec<NodeId>,
    rank: Vec<u32>,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, x: NodeId) -> NodeId {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the sets of `x` and `y`. Returns `false` if they were already in the same set.
    pub fn unite(&mut self, x: NodeId, y: NodeId) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false;
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Checks that `edges` form a spanning tree over `node_count` nodes: exactly `node_count - 1`
/// edges, no cycle, every node connected.
pub fn is_spanning_tree(node_count: usize, edges: &[(NodeId, NodeId)]) -> bool {
    if node_count == 0 {
        return edges.is_empty();
    }
    if edges.len() != node_count - 1 {
        return false;
    }
    let mut sets = UnionFind::new(node_count);
    // n - 1 merges without a cycle leave a single set
    edges
        .iter()
        .all(|&(u, v)| u < node_count && v < node_count && sets.unite(u, v))
}
