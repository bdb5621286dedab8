use std::rc::Rc;

use super::MazeGenerator;
use crate::maze::{Edge, GridGraph, NodeId};

/// Boruvka's minimum spanning tree.
///
/// Work happens in rounds. The step that opens a round scans every edge to find the cheapest
/// edge leaving each component; every following step of the round adds one of those edges.
pub struct Boruvka {
    graph: Rc<GridGraph>,
    edges: Vec<Edge>,
    /// Representative of each node's component. Unions relabel by linear scan.
    components: Vec<NodeId>,
    rank: Vec<u32>,
    /// Cheapest edge leaving each component, indexed by representative, for the current round.
    cheapest: Vec<Option<Edge>>,
    /// Next component to connect in the current round. A value equal to the node count means
    /// the round is over.
    current: usize,
    selected: Vec<Edge>,
    rounds: usize,
    finished: bool,
}

impl Boruvka {
    pub fn new(graph: Rc<GridGraph>) -> Self {
        let node_count = graph.node_count();
        let edges = graph.edges().collect();
        Boruvka {
            graph,
            edges,
            components: (0..node_count).collect(),
            rank: vec![0; node_count],
            cheapest: vec![None; node_count],
            current: node_count,
            selected: Vec::new(),
            rounds: 0,
            finished: node_count <= 1,
        }
    }

    /// Returns the number of rounds started so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Recompute the cheapest outgoing edge of every component. Returns `false` if no
    /// component has one.
    fn start_round(&mut self) -> bool {
        self.cheapest.iter_mut().for_each(|c| *c = None);
        self.current = 0;

        for &edge in &self.edges {
            let component_u = self.components[edge.u];
            let component_v = self.components[edge.v];
            if component_u == component_v {
                continue;
            }
            for component in [component_u, component_v] {
                let slot = &mut self.cheapest[component];
                if slot.is_none_or(|best| edge.weight < best.weight) {
                    *slot = Some(edge);
                }
            }
        }

        self.rounds += 1;
        let has_candidates = self.cheapest.iter().any(Option::is_some);
        tracing::debug!(
            "[boruvka] round {} opened, candidates found: {}",
            self.rounds,
            has_candidates
        );
        has_candidates
    }

    /// Relabel every member of `child` as a member of `parent`.
    fn union(&mut self, parent: NodeId, child: NodeId) {
        self.components
            .iter_mut()
            .filter(|component| **component == child)
            .for_each(|component| *component = parent);
    }
}

impl MazeGenerator for Boruvka {
    fn step(&mut self) {
        if self.finished {
            return;
        }

        if self.current == self.component_count() {
            if !self.start_round() {
                self.finished = true;
                tracing::debug!(
                    "[boruvka] spanning tree complete after {} rounds",
                    self.rounds
                );
            }
            return;
        }

        while self.current < self.component_count() {
            let candidate = self.cheapest[self.current];
            self.current += 1;
            let Some(edge) = candidate else {
                continue;
            };

            let component_u = self.components[edge.u];
            let component_v = self.components[edge.v];
            // An earlier edge of this round may already have joined both ends
            if component_u == component_v {
                continue;
            }

            match self.rank[component_u].cmp(&self.rank[component_v]) {
                std::cmp::Ordering::Greater => self.union(component_u, component_v),
                std::cmp::Ordering::Less => self.union(component_v, component_u),
                std::cmp::Ordering::Equal => {
                    self.union(component_u, component_v);
                    self.rank[component_u] += 1;
                }
            }
            self.selected.push(edge);
            tracing::trace!("[boruvka] selected edge {:?}", edge);
            return;
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn restart(&mut self) {
        self.components
            .iter_mut()
            .enumerate()
            .for_each(|(i, c)| *c = i);
        self.rank.iter_mut().for_each(|r| *r = 0);
        self.cheapest.iter_mut().for_each(|c| *c = None);
        self.current = self.component_count();
        self.selected.clear();
        self.rounds = 0;
        self.finished = self.graph.node_count() <= 1;
    }

    fn selected_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.selected.iter().map(Edge::endpoints).collect()
    }

    fn steps(&self) -> usize {
        self.selected.len() + self.rounds
    }
}
