use std::{collections::VecDeque, marker::PhantomData, rc::Rc};

use super::{PathFinder, TrackedCell};
use crate::maze::{Cell, MazeAdjacency};

/// Which end of the frontier a [`FrontierSearch`] takes its next cell from. New cells always
/// go in at the front.
pub trait PopEnd {
    const NAME: &'static str;

    fn pop(frontier: &mut VecDeque<Rc<TrackedCell>>) -> Option<Rc<TrackedCell>>;
}

/// Pop from the back: the oldest cell first, giving a breadth-first search.
#[derive(Debug)]
pub struct Fifo;

impl PopEnd for Fifo {
    const NAME: &'static str = "bfs";

    fn pop(frontier: &mut VecDeque<Rc<TrackedCell>>) -> Option<Rc<TrackedCell>> {
        frontier.pop_back()
    }
}

/// Uninformed search over a carved maze, one frontier entry per step.
///
/// Cells are marked visited when pushed, so no cell enters the frontier twice.
pub struct FrontierSearch<D: PopEnd> {
    maze: MazeAdjacency,
    start: Cell,
    target: Cell,
    frontier: VecDeque<Rc<TrackedCell>>,
    seen: Vec<bool>,
    /// Visited cells in the order they were reached
    visited: Vec<Cell>,
    found: Option<Rc<TrackedCell>>,
    finished: bool,
    steps: usize,
    pop_end: PhantomData<D>,
}

pub type Bfs = FrontierSearch<Fifo>;

impl<D: PopEnd> FrontierSearch<D> {
    pub fn new(maze: MazeAdjacency, start: Cell, target: Cell) -> Self {
        let cell_count = maze.layout().cell_count();
        let mut search = FrontierSearch {
            maze,
            start,
            target,
            frontier: VecDeque::new(),
            seen: vec![false; cell_count],
            visited: Vec::new(),
            found: None,
            finished: false,
            steps: 0,
            pop_end: PhantomData,
        };
        search.restart();
        search
    }

    fn mark_seen(&mut self, cell: Cell) {
        let index = self.maze.layout().index(cell);
        self.seen[index] = true;
        self.visited.push(cell);
    }

    fn is_seen(&self, cell: Cell) -> bool {
        self.seen[self.maze.layout().index(cell)]
    }
}

impl<D: PopEnd> PathFinder for FrontierSearch<D> {
    fn step(&mut self) {
        if self.finished {
            return;
        }
        let Some(current) = D::pop(&mut self.frontier) else {
            self.finished = true;
            tracing::debug!(
                "[{}] frontier exhausted after {} steps, {} is unreachable",
                D::NAME,
                self.steps,
                self.target
            );
            return;
        };
        self.steps += 1;

        if current.coord == self.target {
            tracing::debug!(
                "[{}] reached {} in {} steps, path cost {}",
                D::NAME,
                self.target,
                self.steps,
                current.traveling_cost
            );
            self.found = Some(current);
            self.finished = true;
            return;
        }

        let next_cells = self
            .maze
            .open_neighbors(current.coord)
            .filter(|&next| !self.is_seen(next))
            .collect::<Vec<_>>();
        for next in next_cells {
            self.mark_seen(next);
            self.frontier.push_front(TrackedCell::child(&current, next));
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn restart(&mut self) {
        self.frontier.clear();
        self.seen.iter_mut().for_each(|s| *s = false);
        self.visited.clear();
        self.found = None;
        self.finished = false;
        self.steps = 0;

        if !self.maze.layout().contains(self.start) {
            self.finished = true;
            return;
        }
        self.mark_seen(self.start);
        self.frontier.push_front(TrackedCell::root(self.start));
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
