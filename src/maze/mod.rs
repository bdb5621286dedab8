mod adjacency;
mod cell;
mod graph;

use std::rc::Rc;

use rand::{Rng, SeedableRng, rngs::StdRng};

pub use adjacency::MazeAdjacency;
pub use cell::{Cell, CellLayout, Split, Wall};
pub use graph::{Edge, GridGraph, NodeId, Weight};

use crate::{
    config::MazeConfig,
    error::{MazeError, Result},
    generators::{Boruvka, Generator, Kruskal, MazeGenerator, Prim, PrimMaze, get_rng},
    solvers::{PathFinder, Solver},
};

/// A solver bound to the maze it was started on.
struct BoundSolver {
    kind: Solver,
    search: Box<dyn PathFinder>,
}

/// Owns the grid graph, the generation engines built for it and at most one solver.
///
/// Engines are built the first time their generator is selected and are kept afterwards, so
/// switching back to a generator resumes where it left off.
pub struct Maze {
    config: MazeConfig,
    graph: Rc<GridGraph>,
    layout: CellLayout,
    /// Source of every engine's own generator
    rng: StdRng,
    generator: Generator,
    prim: Option<Prim>,
    kruskal: Option<Kruskal>,
    boruvka: Option<Boruvka>,
    prim_maze: Option<PrimMaze>,
    solver: Option<BoundSolver>,
}

impl Maze {
    /// Validate `config`, build the weighted grid and start with Prim's algorithm.
    pub fn configure(config: MazeConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;
        let mut rng = get_rng(seed);
        let graph = Rc::new(Maze::build_graph(&config, &mut rng));
        let layout = CellLayout::new(graph.x_count(), graph.y_count());
        tracing::info!(
            "[maze] configured {}x{} nodes ({} cells), seed {:?}",
            graph.x_count(),
            graph.y_count(),
            layout.cell_count(),
            seed
        );
        let mut maze = Maze {
            config,
            graph,
            layout,
            rng,
            generator: Generator::Prim,
            prim: None,
            kruskal: None,
            boruvka: None,
            prim_maze: None,
            solver: None,
        };
        maze.active_mut();
        Ok(maze)
    }

    fn build_graph(config: &MazeConfig, rng: &mut StdRng) -> GridGraph {
        let (x_count, y_count) = config.node_counts();
        GridGraph::build(x_count, y_count, config.max_cost, rng)
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn generator(&self) -> Generator {
        self.generator
    }

    /// Returns the kind of the bound solver, if any.
    pub fn solver(&self) -> Option<Solver> {
        self.solver.as_ref().map(|bound| bound.kind)
    }

    fn active(&self) -> Option<&dyn MazeGenerator> {
        match self.generator {
            Generator::Prim => self.prim.as_ref().map(|e| e as &dyn MazeGenerator),
            Generator::Kruskal => self.kruskal.as_ref().map(|e| e as &dyn MazeGenerator),
            Generator::Boruvka => self.boruvka.as_ref().map(|e| e as &dyn MazeGenerator),
            Generator::PrimMaze => self.prim_maze.as_ref().map(|e| e as &dyn MazeGenerator),
        }
    }

    /// Returns the active engine, building it first if it does not exist yet.
    fn active_mut(&mut self) -> &mut dyn MazeGenerator {
        let graph = &self.graph;
        let rng = &mut self.rng;
        match self.generator {
            Generator::Prim => self
                .prim
                .get_or_insert_with(|| Prim::new(Rc::clone(graph), engine_rng(rng))),
            Generator::Kruskal => self
                .kruskal
                .get_or_insert_with(|| Kruskal::new(Rc::clone(graph))),
            Generator::Boruvka => self
                .boruvka
                .get_or_insert_with(|| Boruvka::new(Rc::clone(graph))),
            Generator::PrimMaze => self
                .prim_maze
                .get_or_insert_with(|| PrimMaze::new(graph, engine_rng(rng))),
        }
    }

    /// Make `generator` the active one. Drops the bound solver.
    pub fn select_generator(&mut self, generator: Generator) {
        self.solver = None;
        self.generator = generator;
        let steps = self.active_mut().steps();
        tracing::info!("[maze] selected {} (resuming at step {})", generator, steps);
    }

    pub fn step_generation(&mut self) {
        self.active_mut().step();
    }

    pub fn is_generation_finished(&self) -> bool {
        self.active().is_some_and(|engine| engine.is_finished())
    }

    /// Returns the number of steps the active engine has taken.
    pub fn generation_steps(&self) -> usize {
        self.active().map_or(0, |engine| engine.steps())
    }

    /// Restart the active engine in place. Drops the bound solver.
    pub fn restart_generation(&mut self) {
        self.solver = None;
        self.active_mut().restart();
        tracing::info!("[maze] restarted {}", self.generator);
    }

    /// Returns the edges to draw for the active engine: tree edges for the spanning tree
    /// algorithms, standing walls for the maze carver.
    pub fn selected_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.active()
            .map(|engine| engine.selected_edges())
            .unwrap_or_default()
    }

    /// Returns the entrance cell and the exit cell of the carved maze.
    pub fn default_endpoints(&self) -> (Cell, Cell) {
        let last_row = self.layout.rows().saturating_sub(1);
        let last_col = self.layout.cols().saturating_sub(1);
        (Cell::new(0, 0), Cell::new(last_row, last_col))
    }

    /// Start `kind` on the carved maze, replacing any bound solver.
    ///
    /// Fails unless the maze carver is active and done, and both cells are inside the maze.
    pub fn bind_solver(&mut self, kind: Solver, start: Cell, target: Cell) -> Result<()> {
        if !self.generator.is_maze() {
            return Err(MazeError::SolverUnavailable {
                generator: self.generator,
            });
        }
        let carver = match &self.prim_maze {
            Some(carver) if carver.is_finished() => carver,
            _ => return Err(MazeError::MazeNotCarved),
        };
        for cell in [start, target] {
            if !self.layout.contains(cell) {
                return Err(MazeError::CellOutOfBounds {
                    cell,
                    rows: self.layout.rows(),
                    cols: self.layout.cols(),
                });
            }
        }

        let search = kind.build(carver.adjacency(), start, target);
        self.solver = Some(BoundSolver { kind, search });
        tracing::info!("[maze] started {} from {} to {}", kind, start, target);
        Ok(())
    }

    pub fn step_solve(&mut self) {
        if let Some(bound) = self.solver.as_mut() {
            bound.search.step();
        }
    }

    /// Returns `false` when no solver is bound.
    pub fn is_solve_finished(&self) -> bool {
        self.solver
            .as_ref()
            .is_some_and(|bound| bound.search.is_finished())
    }

    pub fn solve_steps(&self) -> usize {
        self.solver
            .as_ref()
            .map_or(0, |bound| bound.search.steps())
    }

    pub fn restart_solver(&mut self) {
        if let Some(bound) = self.solver.as_mut() {
            bound.search.restart();
            tracing::info!("[maze] restarted {}", bound.kind);
        }
    }

    /// Returns the cells to draw for the bound solver, and whether they form the final path.
    pub fn solver_cells(&self) -> (Vec<Cell>, bool) {
        match &self.solver {
            Some(bound) => (
                bound.search.visited_or_path(),
                bound.search.is_finished(),
            ),
            None => (Vec::new(), false),
        }
    }

    /// Replace the graph and every engine with new ones built for `config`. The active
    /// generator stays selected and starts over. Drops the bound solver.
    pub fn rebuild(&mut self, config: MazeConfig) -> Result<()> {
        config.validate()?;
        self.graph = Rc::new(Maze::build_graph(&config, &mut self.rng));
        self.layout = CellLayout::new(self.graph.x_count(), self.graph.y_count());
        self.config = config;
        self.prim = None;
        self.kruskal = None;
        self.boruvka = None;
        self.prim_maze = None;
        self.solver = None;
        self.active_mut();
        tracing::info!(
            "[maze] rebuilt with cell size {}: {}x{} nodes",
            config.cell_size,
            self.graph.x_count(),
            self.graph.y_count()
        );
        Ok(())
    }
}

/// Draw an independent generator for one engine, so a seeded maze stays reproducible.
fn engine_rng(rng: &mut StdRng) -> StdRng {
    StdRng::seed_from_u64(rng.random())
}
