use std::rc::Rc;

use rand::{Rng, rngs::StdRng};

use super::MazeGenerator;
use crate::maze::{GridGraph, NodeId, Weight};

/// Prim's minimum spanning tree, settling one node per step.
pub struct Prim {
    graph: Rc<GridGraph>,
    rng: StdRng,
    root: NodeId,
    /// Cheapest known edge into each unvisited node. `None` stands for no known edge.
    cost: Vec<Option<Weight>>,
    /// Node through which each node was (or will be) attached to the tree.
    parent: Vec<Option<NodeId>>,
    visited: Vec<bool>,
    /// Number of visited nodes, the root included.
    settled: usize,
    steps: usize,
}

impl Prim {
    pub fn new(graph: Rc<GridGraph>, rng: StdRng) -> Self {
        let node_count = graph.node_count();
        let mut prim = Prim {
            graph,
            rng,
            root: 0,
            cost: vec![None; node_count],
            parent: vec![None; node_count],
            visited: vec![false; node_count],
            settled: 0,
            steps: 0,
        };
        prim.restart();
        prim
    }

    /// Returns the node the tree grows from.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the unvisited node with the cheapest known edge, lowest index first on ties.
    fn cheapest_unvisited(&self) -> Option<NodeId> {
        self.cost
            .iter()
            .enumerate()
            .filter(|&(node, _)| !self.visited[node])
            .filter_map(|(node, cost)| cost.map(|c| (c, node)))
            .min()
            .map(|(_, node)| node)
    }
}

impl MazeGenerator for Prim {
    fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        // Only a disconnected graph leaves unvisited nodes with no known edge
        let Some(v) = self.cheapest_unvisited() else {
            return;
        };

        self.cost[v] = None;
        self.visited[v] = true;
        self.settled += 1;
        self.steps += 1;
        tracing::trace!("[prim] settled node {} via {:?}", v, self.parent[v]);

        for (n, weight) in self.graph.neighbors(v) {
            if self.visited[n] {
                continue;
            }
            if self.cost[n].is_none_or(|c| weight < c) {
                self.parent[n] = Some(v);
                self.cost[n] = Some(weight);
            }
        }

        if self.is_finished() {
            tracing::debug!("[prim] spanning tree complete after {} steps", self.steps);
        }
    }

    fn is_finished(&self) -> bool {
        self.settled == self.graph.node_count()
    }

    fn restart(&mut self) {
        let node_count = self.graph.node_count();
        self.cost.iter_mut().for_each(|c| *c = None);
        self.parent.iter_mut().for_each(|p| *p = None);
        self.visited.iter_mut().for_each(|v| *v = false);
        self.settled = 0;
        self.steps = 0;
        if node_count == 0 {
            return;
        }

        self.root = self.rng.random_range(0..node_count);
        let root = self.root;
        // Seed the frontier with the root's neighbors
        for (n, weight) in self.graph.neighbors(root) {
            self.cost[n] = Some(weight);
            self.parent[n] = Some(root);
        }
        self.parent[root] = Some(root);
        self.visited[root] = true;
        self.settled = 1;
    }

    fn selected_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(node, _)| self.visited[node])
            .filter_map(|(node, parent)| {
                parent
                    .filter(|&p| p != node)
                    .map(|p| (p.min(node), p.max(node)))
            })
            .collect()
    }

    fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, is_spanning_tree, test_utils::run_to_completion};

    fn total_weight(graph: &GridGraph, edges: &[(NodeId, NodeId)]) -> Weight {
        edges
            .iter()
            .map(|&(u, v)| graph.weight(u, v).expect("selected edge exists"))
            .sum()
    }

    #[test]
    fn test_prim_spanning_tree() {
        let mut rng = get_rng(Some(1));
        let graph = Rc::new(GridGraph::build(7, 5, 20, &mut rng));
        let mut prim = Prim::new(Rc::clone(&graph), get_rng(Some(2)));
        assert!(!prim.is_finished());
        // One step per node besides the root
        assert_eq!(run_to_completion(&mut prim, 100), 34);
        let edges = prim.selected_edges();
        assert_eq!(edges.len(), 34);
        assert!(is_spanning_tree(35, &edges));
    }

    #[test]
    fn test_prim_two_by_two_uniform() {
        let graph = Rc::new(GridGraph::uniform(2, 2, 1));
        let mut prim = Prim::new(graph, get_rng(Some(0)));
        run_to_completion(&mut prim, 10);
        let edges = prim.selected_edges();
        assert_eq!(edges.len(), 3);
        assert!(is_spanning_tree(4, &edges));
    }

    #[test]
    fn test_prim_partial_state_is_a_tree() {
        let graph = Rc::new(GridGraph::uniform(5, 5, 3));
        let mut prim = Prim::new(graph, get_rng(Some(9)));
        for expected in 0..10 {
            assert_eq!(prim.selected_edges().len(), expected);
            prim.step();
        }
        // Every visited node is attached through its recorded parent
        for (node, visited) in prim.visited.iter().enumerate() {
            if *visited {
                assert!(prim.parent[node].is_some());
            }
        }
    }

    #[test]
    fn test_prim_picks_cheapest_edge() {
        // 3x1 path: 0 -(5)- 1 -(1)- 2
        let graph = Rc::new(GridGraph::from_fn(3, 1, |u, _| if u == 0 { 5 } else { 1 }));
        let mut prim = Prim::new(Rc::clone(&graph), get_rng(Some(4)));
        run_to_completion(&mut prim, 5);
        let mut edges = prim.selected_edges();
        edges.sort();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
        assert_eq!(total_weight(&graph, &edges), 6);
    }

    #[test]
    fn test_prim_restart() {
        let graph = Rc::new(GridGraph::uniform(4, 4, 1));
        let mut prim = Prim::new(graph, get_rng(Some(5)));
        run_to_completion(&mut prim, 100);
        prim.restart();
        assert!(!prim.is_finished());
        assert!(prim.selected_edges().is_empty());
        // The root is its own parent and starts out visited
        let root = prim.root();
        assert!(prim.visited[root]);
        assert_eq!(prim.parent[root], Some(root));
        assert_eq!(prim.steps(), 0);
        run_to_completion(&mut prim, 100);
        assert!(is_spanning_tree(16, &prim.selected_edges()));
    }

    #[test]
    fn test_prim_single_node_is_finished() {
        let graph = Rc::new(GridGraph::uniform(1, 1, 1));
        let mut prim = Prim::new(graph, get_rng(Some(0)));
        assert!(prim.is_finished());
        prim.step();
        assert!(prim.selected_edges().is_empty());
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let graph = Rc::new(GridGraph::uniform(3, 3, 2));
        let mut prim = Prim::new(graph, get_rng(Some(8)));
        run_to_completion(&mut prim, 20);
        let before = prim.selected_edges();
        prim.step();
        assert_eq!(prim.selected_edges(), before);
        assert_eq!(prim.steps(), 8);
    }
}
