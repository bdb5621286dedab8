use std::{fmt, str::FromStr};

use rand::{SeedableRng, rngs::StdRng};

mod boruvka;
mod kruskal;
mod prim;
mod prim_maze;
mod union_find;

pub use boruvka::Boruvka;
pub use kruskal::Kruskal;
pub use prim::Prim;
pub use prim_maze::PrimMaze;
pub use union_find::{UnionFind, is_spanning_tree};

use crate::maze::NodeId;

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Available generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
    Prim,
    Kruskal,
    Boruvka,
    PrimMaze,
}

impl Generator {
    pub const ALL: [Generator; 4] = [
        Generator::Prim,
        Generator::Kruskal,
        Generator::Boruvka,
        Generator::PrimMaze,
    ];

    /// Whether this generator carves a maze that solvers can walk.
    pub fn is_maze(self) -> bool {
        matches!(self, Generator::PrimMaze)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Boruvka => write!(f, "Boruvka's Algorithm"),
            Generator::PrimMaze => write!(f, "Randomized Prim's Maze"),
        }
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prim" => Ok(Generator::Prim),
            "kruskal" => Ok(Generator::Kruskal),
            "boruvka" => Ok(Generator::Boruvka),
            "prim-maze" | "maze" => Ok(Generator::PrimMaze),
            other => Err(format!(
                "unknown generator '{other}', expected one of: prim, kruskal, boruvka, prim-maze"
            )),
        }
    }
}

/// A generation algorithm that advances one edge or wall decision at a time.
///
/// Every state reached between two calls to [`MazeGenerator::step`] is valid to render.
pub trait MazeGenerator {
    /// Advance by one unit of work. Does nothing once finished.
    fn step(&mut self);

    fn is_finished(&self) -> bool;

    /// Reinitialize all internal state in place, drawing fresh randomness where the algorithm
    /// uses any.
    fn restart(&mut self);

    /// Node pairs to draw: tree edges for spanning tree algorithms, standing walls for mazes.
    fn selected_edges(&self) -> Vec<(NodeId, NodeId)>;

    /// Number of steps that did work since construction or the last restart.
    fn steps(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::MazeGenerator;

    /// Step a generator until it reports finished, failing the test if it takes more than
    /// `max_steps` calls.
    pub fn run_to_completion(generator: &mut dyn MazeGenerator, max_steps: usize) -> usize {
        let mut calls = 0;
        while !generator.is_finished() {
            assert!(calls < max_steps, "generator did not finish in {max_steps} steps");
            generator.step();
            calls += 1;
        }
        calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generator() {
        assert_eq!("Prim".parse::<Generator>(), Ok(Generator::Prim));
        assert_eq!("kruskal".parse::<Generator>(), Ok(Generator::Kruskal));
        assert_eq!("BORUVKA".parse::<Generator>(), Ok(Generator::Boruvka));
        assert_eq!("prim-maze".parse::<Generator>(), Ok(Generator::PrimMaze));
        assert!("dfs".parse::<Generator>().is_err());
    }

    #[test]
    fn test_only_prim_maze_is_a_maze() {
        let mazes = Generator::ALL
            .iter()
            .filter(|g| g.is_maze())
            .collect::<Vec<_>>();
        assert_eq!(mazes, vec![&Generator::PrimMaze]);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;
        let a = get_rng(Some(3)).random::<u64>();
        let b = get_rng(Some(3)).random::<u64>();
        assert_eq!(a, b);
    }
}
