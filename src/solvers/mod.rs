use std::{fmt, rc::Rc, str::FromStr};

mod astar;
mod bfs;
mod dfs;

pub use astar::{AStar, Heuristic};
pub use bfs::{Bfs, Fifo, FrontierSearch, PopEnd};
pub use dfs::{Dfs, Lifo};

use crate::maze::{Cell, MazeAdjacency};

/// A cell reached during a search, linked back to the cell it was reached from.
#[derive(Debug)]
pub struct TrackedCell {
    /// Coordinates of the cell in the maze
    coord: Cell,
    /// The parent cell from which this cell was reached
    parent: Option<Rc<TrackedCell>>,
    /// Cost to reach this cell from the start
    traveling_cost: usize,
}

impl TrackedCell {
    fn root(coord: Cell) -> Rc<Self> {
        Rc::new(TrackedCell {
            coord,
            parent: None,
            traveling_cost: 0,
        })
    }

    fn child(parent: &Rc<TrackedCell>, coord: Cell) -> Rc<Self> {
        Rc::new(TrackedCell {
            coord,
            parent: Some(Rc::clone(parent)),
            traveling_cost: parent.traveling_cost + 1,
        })
    }

    /// Walk the parent links back to the start and return the cells from start to here.
    fn path(self: &Rc<Self>) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.traveling_cost + 1);
        let mut current = Some(self);
        while let Some(tracked) = current {
            cells.push(tracked.coord);
            current = tracked.parent.as_ref();
        }
        cells.reverse();
        cells
    }
}

/// Available maze solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Bfs,
    Dfs,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Bfs, Solver::Dfs, Solver::AStar];

    /// Construct the search for this solver, bound to `maze` and the given endpoints.
    pub fn build(self, maze: MazeAdjacency, start: Cell, target: Cell) -> Box<dyn PathFinder> {
        match self {
            Solver::Bfs => Box::new(Bfs::new(maze, start, target)),
            Solver::Dfs => Box::new(Dfs::new(maze, start, target)),
            Solver::AStar => Box::new(AStar::new(maze, start, target, Heuristic::Manhattan)),
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl FromStr for Solver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Solver::Bfs),
            "dfs" => Ok(Solver::Dfs),
            "astar" | "a*" => Ok(Solver::AStar),
            other => Err(format!(
                "unknown solver '{other}', expected one of: bfs, dfs, astar"
            )),
        }
    }
}

/// A maze search that expands one frontier entry at a time.
pub trait PathFinder {
    /// Expand one frontier entry. Does nothing once finished.
    fn step(&mut self);

    /// True once the target was reached or the frontier ran out.
    fn is_finished(&self) -> bool;

    /// Start the search over from the start cell.
    fn restart(&mut self);

    /// Cells visited so far.
    fn visited(&self) -> Vec<Cell>;

    /// The path from start to target, start and target included. Empty until the search
    /// finishes, and empty afterwards if the target is unreachable.
    fn path(&self) -> Vec<Cell>;

    /// Number of expansions since construction or the last restart.
    fn steps(&self) -> usize;

    /// What to draw: the visited cells while searching, the path once finished.
    fn visited_or_path(&self) -> Vec<Cell> {
        if self.is_finished() {
            self.path()
        } else {
            self.visited()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::collections::HashSet;

    use super::PathFinder;
    use crate::{
        generators::{MazeGenerator, PrimMaze, get_rng},
        maze::{Cell, GridGraph, MazeAdjacency},
    };

    /// Carve a maze with `cols x rows` cells.
    pub fn carved_maze(cols: usize, rows: usize, seed: u64) -> MazeAdjacency {
        let graph = GridGraph::uniform(cols + 1, rows + 1, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(seed)));
        while !maze.is_finished() {
            maze.step();
        }
        maze.adjacency()
    }

    /// Step a solver until it reports finished, returning the number of calls.
    pub fn solve(solver: &mut dyn PathFinder, max_steps: usize) -> usize {
        let mut calls = 0;
        while !solver.is_finished() {
            assert!(calls < max_steps, "solver did not finish in {max_steps} steps");
            solver.step();
            calls += 1;
        }
        calls
    }

    /// Assert that `path` walks from `start` to `target` through open walls without repeating
    /// a cell.
    pub fn assert_valid_path(maze: &MazeAdjacency, path: &[Cell], start: Cell, target: Cell) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&target));
        for pair in path.windows(2) {
            assert!(
                maze.is_open(pair[0], pair[1]),
                "no passage between {} and {}",
                pair[0],
                pair[1]
            );
        }
        let unique = path.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), path.len(), "path repeats a cell");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::*;

    #[test]
    fn test_parse_solver() {
        assert_eq!("BFS".parse::<Solver>(), Ok(Solver::Bfs));
        assert_eq!("dfs".parse::<Solver>(), Ok(Solver::Dfs));
        assert_eq!("a*".parse::<Solver>(), Ok(Solver::AStar));
        assert!("dijkstra".parse::<Solver>().is_err());
    }

    #[test]
    fn test_tracked_cell_path() {
        let start = TrackedCell::root(Cell::new(0, 0));
        let next = TrackedCell::child(&start, Cell::new(0, 1));
        let last = TrackedCell::child(&next, Cell::new(1, 1));
        assert_eq!(last.traveling_cost, 2);
        assert_eq!(
            last.path(),
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_every_solver_finds_a_valid_path() {
        let maze = carved_maze(8, 6, 17);
        let start = Cell::new(0, 0);
        let target = Cell::new(5, 7);
        for kind in Solver::ALL {
            let mut solver = kind.build(maze.clone(), start, target);
            solve(solver.as_mut(), 1000);
            let path = solver.path();
            assert_valid_path(&maze, &path, start, target);
            assert_eq!(solver.visited_or_path(), path);
        }
    }

    #[test]
    fn test_visited_or_path_while_running() {
        let maze = carved_maze(5, 5, 1);
        let mut solver = Solver::Bfs.build(maze, Cell::new(0, 0), Cell::new(4, 4));
        solver.step();
        assert!(!solver.is_finished());
        assert!(solver.path().is_empty());
        assert_eq!(solver.visited_or_path(), solver.visited());
    }
}
