use std::time::Instant;

use clap::Parser;

use spanmaze::{
    config::{MazeConfig, seed_from_env},
    error::Result,
    generators::{Generator, is_spanning_tree},
    logging,
    maze::Maze,
    solvers::Solver,
};

/// Run a generator (and a solver, for the maze carver) to completion without a terminal UI.
#[derive(Debug, Parser)]
#[command(name = "profile", version)]
struct Args {
    /// Generator to run: prim, kruskal, boruvka or prim-maze.
    #[arg(long, default_value = "prim-maze")]
    generator: Generator,

    /// Solver to run on the carved maze: bfs, dfs or astar.
    #[arg(long, default_value = "bfs")]
    solver: Solver,

    /// Layout width in units.
    #[arg(long, default_value_t = 200)]
    width: u16,

    /// Layout height in units.
    #[arg(long, default_value_t = 200)]
    height: u16,

    /// Distance between neighboring grid nodes.
    #[arg(long, default_value_t = 2)]
    cell_size: u16,

    /// Largest random edge weight.
    #[arg(long, default_value_t = 1000)]
    max_cost: u32,

    /// Number of times to repeat the run.
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

fn profile_once(args: &Args, config: MazeConfig, seed: Option<u64>) -> Result<()> {
    let started = Instant::now();
    let mut maze = Maze::configure(config, seed)?;
    maze.select_generator(args.generator);
    println!(
        "{}x{} nodes built in {:?}",
        maze.graph().x_count(),
        maze.graph().y_count(),
        started.elapsed()
    );

    let started = Instant::now();
    while !maze.is_generation_finished() {
        maze.step_generation();
    }
    println!(
        "{}: {} steps in {:?}",
        args.generator,
        maze.generation_steps(),
        started.elapsed()
    );

    if !args.generator.is_maze() {
        let valid = is_spanning_tree(maze.graph().node_count(), &maze.selected_edges());
        println!("spanning tree valid: {valid}");
        return Ok(());
    }
    let (start, target) = maze.default_endpoints();
    maze.bind_solver(args.solver, start, target)?;
    let started = Instant::now();
    while !maze.is_solve_finished() {
        maze.step_solve();
    }
    let (path, _) = maze.solver_cells();
    println!(
        "{}: {} steps in {:?}, path of {} cells",
        args.solver,
        maze.solve_steps(),
        started.elapsed(),
        path.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = logging::init(args.log_file.as_deref());
    let config = MazeConfig {
        width: args.width,
        height: args.height,
        cell_size: args.cell_size,
        max_cost: args.max_cost,
    };
    let seed = seed_from_env();
    for _ in 0..args.iterations {
        profile_once(&args, config, seed)?;
    }
    Ok(())
}
