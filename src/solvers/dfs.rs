use std::{collections::VecDeque, rc::Rc};

use super::{FrontierSearch, PopEnd, TrackedCell};

/// Pop from the front: the newest cell first, giving a depth-first search.
#[derive(Debug)]
pub struct Lifo;

impl PopEnd for Lifo {
    const NAME: &'static str = "dfs";

    fn pop(frontier: &mut VecDeque<Rc<TrackedCell>>) -> Option<Rc<TrackedCell>> {
        frontier.pop_front()
    }
}

pub type Dfs = FrontierSearch<Lifo>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        maze::{Cell, CellLayout, MazeAdjacency},
        solvers::{Bfs, PathFinder, test_utils::*},
    };

    #[test]
    fn test_dfs_path_is_valid() {
        for seed in 0..5 {
            let maze = carved_maze(7, 5, seed);
            let (start, target) = (Cell::new(0, 0), Cell::new(4, 6));
            let mut dfs = Dfs::new(maze.clone(), start, target);
            solve(&mut dfs, 1000);
            assert_valid_path(&maze, &dfs.path(), start, target);
        }
    }

    #[test]
    fn test_dfs_dives_before_widening() {
        // 2x4 cells without interior walls
        let maze = MazeAdjacency::new(CellLayout::new(5, 3), Rc::default());
        let start = Cell::new(0, 0);
        let target = Cell::new(1, 3);

        let mut dfs = Dfs::new(maze.clone(), start, target);
        let mut bfs = Bfs::new(maze, start, target);
        for _ in 0..2 {
            dfs.step();
            bfs.step();
        }
        // Expanding the start queues (1, 0) then (0, 1). DFS expands (0, 1) next and reaches
        // (0, 2), BFS expands (1, 0) and does not.
        assert!(dfs.visited().contains(&Cell::new(0, 2)));
        assert!(!bfs.visited().contains(&Cell::new(0, 2)));
        solve(&mut dfs, 100);
        solve(&mut bfs, 100);
        assert!(dfs.path().len() >= bfs.path().len());
    }

    #[test]
    fn test_perfect_maze_paths_agree() {
        // A perfect maze has exactly one simple path between two cells
        let maze = carved_maze(6, 6, 12);
        let (start, target) = (Cell::new(0, 0), Cell::new(5, 5));
        let mut dfs = Dfs::new(maze.clone(), start, target);
        let mut bfs = Bfs::new(maze, start, target);
        solve(&mut dfs, 1000);
        solve(&mut bfs, 1000);
        assert_eq!(dfs.path(), bfs.path());
    }
}
