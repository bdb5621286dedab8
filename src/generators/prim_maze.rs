use std::{collections::HashSet, rc::Rc};

use rand::{Rng, rngs::StdRng};

use super::MazeGenerator;
use crate::maze::{Cell, CellLayout, GridGraph, MazeAdjacency, NodeId, Split, Wall};

/// Randomized Prim's maze carver over the cells bounded by the grid graph.
///
/// Starts with every wall standing except the entrance and the exit, then knocks down walls
/// picked at random from the frontier until every cell is part of the maze.
pub struct PrimMaze {
    layout: CellLayout,
    rng: StdRng,
    /// Walls that may still be knocked down. May hold the same wall twice.
    frontier: Vec<Wall>,
    visited: Vec<bool>,
    /// Every wall of the grid, standing or not.
    grid_walls: HashSet<Wall>,
    /// Walls still standing. Shared with the solvers once carving is done.
    standing: Rc<HashSet<Wall>>,
    carved: usize,
    steps: usize,
}

impl PrimMaze {
    pub fn new(graph: &GridGraph, rng: StdRng) -> Self {
        let layout = CellLayout::new(graph.x_count(), graph.y_count());
        let mut maze = PrimMaze {
            layout,
            rng,
            frontier: Vec::new(),
            visited: vec![false; layout.cell_count()],
            grid_walls: graph.edges().map(|e| e.endpoints()).collect(),
            standing: Rc::default(),
            carved: 0,
            steps: 0,
        };
        maze.restart();
        maze
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Number of walls knocked down so far, entrance and exit excluded.
    pub fn carved(&self) -> usize {
        self.carved
    }

    /// Returns the walls still standing.
    pub fn standing_walls(&self) -> &HashSet<Wall> {
        &self.standing
    }

    /// Returns a view for querying which cells connect to each other.
    pub fn adjacency(&self) -> MazeAdjacency {
        MazeAdjacency::new(self.layout, Rc::clone(&self.standing))
    }

    fn is_visited(&self, cell: Cell) -> bool {
        self.visited[self.layout.index(cell)]
    }

    fn visit(&mut self, cell: Cell) {
        let index = self.layout.index(cell);
        self.visited[index] = true;
    }

    /// Knock down `wall` and grow the maze into `cell`.
    fn carve(&mut self, wall: Wall, cell: Cell) {
        Rc::make_mut(&mut self.standing).remove(&wall);
        self.carved += 1;
        self.visit(cell);
        self.frontier.extend(self.layout.cell_walls(cell));
        tracing::trace!("[prim maze] carved {:?} into {}", wall, cell);
    }
}

impl MazeGenerator for PrimMaze {
    fn step(&mut self) {
        if self.frontier.is_empty() {
            return;
        }
        self.steps += 1;

        // Randomly select a wall from the frontier
        let index = self.rng.random_range(0..self.frontier.len());
        let wall = self.frontier.swap_remove(index);

        match self.layout.split(wall) {
            Split::Outside => {}
            Split::Boundary(cell) => self.visit(cell),
            Split::Between(first, second) => {
                match (self.is_visited(first), self.is_visited(second)) {
                    (false, true) => self.carve(wall, first),
                    (true, false) => self.carve(wall, second),
                    // Both sides already belong to the maze, or neither does
                    _ => {}
                }
            }
        }

        if self.frontier.is_empty() {
            tracing::debug!(
                "[prim maze] carving complete: {} walls carved in {} steps",
                self.carved,
                self.steps
            );
        }
    }

    fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    fn restart(&mut self) {
        self.frontier.clear();
        self.visited.iter_mut().for_each(|v| *v = false);
        self.carved = 0;
        self.steps = 0;

        let mut standing = self.grid_walls.clone();
        if self.layout.cell_count() == 0 {
            self.standing = Rc::new(standing);
            return;
        }
        standing.remove(&self.layout.entrance());
        standing.remove(&self.layout.exit());
        self.standing = Rc::new(standing);

        let start = Cell::new(0, 0);
        self.visit(start);
        self.frontier.extend(self.layout.cell_walls(start));
    }

    fn selected_edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut walls = self.standing.iter().copied().collect::<Vec<_>>();
        walls.sort_unstable();
        walls
    }

    fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, test_utils::run_to_completion};

    /// Count the cells reachable from `(0, 0)` through carved walls only.
    fn reachable_cells(maze: &PrimMaze) -> usize {
        let adjacency = maze.adjacency();
        let mut seen = HashSet::from([Cell::new(0, 0)]);
        let mut stack = vec![Cell::new(0, 0)];
        while let Some(cell) = stack.pop() {
            for next in adjacency.open_neighbors(cell) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn test_two_by_two_cells() {
        let graph = GridGraph::uniform(3, 3, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(0)));
        run_to_completion(&mut maze, 100);
        assert_eq!(maze.carved(), 3);
        assert_eq!(reachable_cells(&maze), 4);
        // 12 grid walls, minus entrance and exit, minus 3 carved
        assert_eq!(maze.selected_edges().len(), 7);
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let graph = GridGraph::uniform(4, 4, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(11)));
        run_to_completion(&mut maze, 200);
        let mut before = maze.selected_edges();
        before.sort_unstable();
        let steps = maze.steps();
        maze.step();
        let mut after = maze.selected_edges();
        after.sort_unstable();
        assert!(maze.is_finished());
        assert_eq!(after, before);
        assert_eq!(maze.steps(), steps);
        assert_eq!(maze.carved(), 8);
    }

    #[test]
    fn test_perfect_maze() {
        for seed in 0..10 {
            let graph = GridGraph::uniform(9, 7, 1);
            let mut maze = PrimMaze::new(&graph, get_rng(Some(seed)));
            run_to_completion(&mut maze, 10_000);
            let cells = maze.layout().cell_count();
            assert_eq!(maze.carved(), cells - 1);
            assert_eq!(reachable_cells(&maze), cells);
        }
    }

    #[test]
    fn test_entrance_and_exit_stay_open() {
        let graph = GridGraph::uniform(5, 4, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(3)));
        let layout = *maze.layout();
        for _ in 0..2 {
            assert!(!maze.standing_walls().contains(&layout.entrance()));
            assert!(!maze.standing_walls().contains(&layout.exit()));
            run_to_completion(&mut maze, 10_000);
            assert!(!maze.standing_walls().contains(&layout.entrance()));
            assert!(!maze.standing_walls().contains(&layout.exit()));
            maze.restart();
        }
    }

    #[test]
    fn test_restart_rebuilds_walls() {
        let graph = GridGraph::uniform(4, 4, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(6)));
        let initial = maze.selected_edges();
        assert_eq!(initial.len(), graph.edge_count() - 2);
        run_to_completion(&mut maze, 10_000);
        maze.restart();
        assert!(!maze.is_finished());
        assert_eq!(maze.carved(), 0);
        assert_eq!(maze.selected_edges(), initial);
    }

    #[test]
    fn test_adjacency_survives_restart() {
        let graph = GridGraph::uniform(4, 4, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(2)));
        run_to_completion(&mut maze, 10_000);
        let adjacency = maze.adjacency();
        let open_before = adjacency.open_neighbors(Cell::new(1, 1)).count();
        maze.restart();
        // The view keeps the carved maze it was taken from
        assert_eq!(adjacency.open_neighbors(Cell::new(1, 1)).count(), open_before);
        assert!(open_before > 0);
    }

    #[test]
    fn test_single_row_of_nodes_has_no_cells() {
        let graph = GridGraph::uniform(4, 1, 1);
        let mut maze = PrimMaze::new(&graph, get_rng(Some(0)));
        assert!(maze.is_finished());
        maze.step();
        assert_eq!(maze.carved(), 0);
    }
}
