use std::{
    cmp::{Ordering, Reverse},
    collections::{BinaryHeap, HashMap, HashSet},
    rc::Rc,
};

use super::{PathFinder, TrackedCell};
use crate::maze::{Cell, MazeAdjacency};

/// Estimate of the remaining distance to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Cell, to: Cell) -> f64 {
        match self {
            Heuristic::Manhattan => from.manhattan(to) as f64,
            Heuristic::Euclidean => from.euclidean(to),
        }
    }
}

/// Heap entry. Compares by estimated total cost, then path cost, then cell.
struct Candidate {
    estimate: f64,
    tracked: Rc<TrackedCell>,
}

impl Candidate {
    fn key(&self) -> (usize, Cell) {
        (self.tracked.traveling_cost, self.tracked.coord)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate
            .total_cmp(&other.estimate)
            .then_with(|| self.key().cmp(&other.key()))
    }
}

/// A* search over a carved maze with unit step costs.
pub struct AStar {
    maze: MazeAdjacency,
    start: Cell,
    target: Cell,
    heuristic: Heuristic,
    // Using Reverse to turn the max-heap into a min-heap
    open: BinaryHeap<Reverse<Candidate>>,
    closed: HashSet<Cell>,
    /// Cheapest known cost to reach each cell pushed so far
    best_cost: HashMap<Cell, usize>,
    /// Closed cells in the order they were closed
    visited: Vec<Cell>,
    found: Option<Rc<TrackedCell>>,
    finished: bool,
    steps: usize,
}

impl AStar {
    pub fn new(maze: MazeAdjacency, start: Cell, target: Cell, heuristic: Heuristic) -> Self {
        let mut search = AStar {
            maze,
            start,
            target,
            heuristic,
            open: BinaryHeap::new(),
            closed: HashSet::new(),
            best_cost: HashMap::new(),
            visited: Vec::new(),
            found: None,
            finished: false,
            steps: 0,
        };
        search.restart();
        search
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    fn push(&mut self, tracked: Rc<TrackedCell>) {
        let estimate =
            tracked.traveling_cost as f64 + self.heuristic.estimate(tracked.coord, self.target);
        self.best_cost.insert(tracked.coord, tracked.traveling_cost);
        self.open.push(Reverse(Candidate { estimate, tracked }));
    }
}

impl PathFinder for AStar {
    fn step(&mut self) {
        if self.finished {
            return;
        }

        // Skip entries for cells that were closed through a cheaper route
        let current = loop {
            match self.open.pop() {
                Some(Reverse(candidate)) if self.closed.contains(&candidate.tracked.coord) => {}
                Some(Reverse(candidate)) => break candidate.tracked,
                None => {
                    self.finished = true;
                    tracing::debug!(
                        "[astar] open set exhausted after {} steps, {} is unreachable",
                        self.steps,
                        self.target
                    );
                    return;
                }
            }
        };
        self.steps += 1;
        self.closed.insert(current.coord);
        self.visited.push(current.coord);

        if current.coord == self.target {
            tracing::debug!(
                "[astar] reached {} in {} steps, path cost {}",
                self.target,
                self.steps,
                current.traveling_cost
            );
            self.found = Some(current);
            self.finished = true;
            return;
        }

        let new_cost = current.traveling_cost + 1;
        let cheaper = self
            .maze
            .open_neighbors(current.coord)
            .filter(|next| !self.closed.contains(next))
            .filter(|next| {
                self.best_cost
                    .get(next)
                    .is_none_or(|&known| new_cost < known)
            })
            .collect::<Vec<_>>();
        for next in cheaper {
            self.push(TrackedCell::child(&current, next));
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn restart(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.best_cost.clear();
        self.visited.clear();
        self.found = None;
        self.finished = false;
        self.steps = 0;

        if !self.maze.layout().contains(self.start) {
            self.finished = true;
            return;
        }
        self.push(TrackedCell::root(self.start));
    }

    fn visited(&self) -> Vec<Cell> {
        self.visited.clone()
    }

    fn path(&self) -> Vec<Cell> {
        self.found.as_ref().map(TrackedCell::path).unwrap_or_default()
    }

    fn steps(&self) -> usize {
        self.steps
    }
}
