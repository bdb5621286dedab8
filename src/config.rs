use std::path::PathBuf;

use clap::Parser;

use crate::{
    error::{MazeError, Result},
    generators::Generator,
};

/// Environment variable holding the random seed. OS entropy is used when it is unset.
pub const SEED_ENV: &str = "SPANMAZE_SEED";

/// Smallest cell size the terminal can draw, in layout units.
pub const MIN_CELL_SIZE: u16 = 2;
/// Largest cell size offered by the terminal controls.
pub const MAX_CELL_SIZE: u16 = 8;

/// Layout of the maze in drawing units.
///
/// The grid graph gets one node every `cell_size` units along each axis, starting at zero,
/// so a 10x6 layout with cell size 2 has 6x4 nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: u16,
    pub height: u16,
    pub cell_size: u16,
    /// Edge weights are drawn uniformly from `1..=max_cost`
    pub max_cost: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 30,
            cell_size: 2,
            max_cost: 1000,
        }
    }
}

impl MazeConfig {
    /// Checks that the layout holds at least one cell and that edges can get a weight.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(MazeError::invalid_config("cell size must be positive"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::invalid_config(format!(
                "layout must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width < self.cell_size || self.height < self.cell_size {
            return Err(MazeError::invalid_config(format!(
                "a {}x{} layout cannot hold a single cell of size {}",
                self.width, self.height, self.cell_size
            )));
        }
        if self.max_cost == 0 {
            return Err(MazeError::invalid_config("max cost must be at least 1"));
        }
        Ok(())
    }

    /// Returns the number of grid nodes along each axis as `(x_count, y_count)`.
    pub fn node_counts(&self) -> (usize, usize) {
        let cell_size = usize::from(self.cell_size.max(1));
        (
            usize::from(self.width) / cell_size + 1,
            usize::from(self.height) / cell_size + 1,
        )
    }

    /// Returns a copy with a different cell size.
    pub fn with_cell_size(self, cell_size: u16) -> Self {
        Self { cell_size, ..self }
    }
}

/// Command line arguments of the interactive visualizer.
#[derive(Debug, Parser)]
#[command(
    name = "spanmaze",
    about = "Watch spanning trees grow and mazes get carved and solved, one step at a time",
    version
)]
pub struct Cli {
    /// Layout width in units. Defaults to what fits the terminal.
    #[arg(long)]
    pub width: Option<u16>,

    /// Layout height in units. Defaults to what fits the terminal.
    #[arg(long)]
    pub height: Option<u16>,

    /// Distance between neighboring grid nodes, from 2 to 8.
    #[arg(
        long,
        default_value_t = MIN_CELL_SIZE,
        value_parser = clap::value_parser!(u16)
            .range(i64::from(MIN_CELL_SIZE)..=i64::from(MAX_CELL_SIZE))
    )]
    pub cell_size: u16,

    /// Largest random edge weight.
    #[arg(long, default_value_t = 1000)]
    pub max_cost: u32,

    /// Delay between animation frames, in milliseconds.
    #[arg(long, default_value_t = 20)]
    pub delay_ms: u64,

    /// Generator to start with: prim, kruskal, boruvka or prim-maze.
    #[arg(long, default_value = "prim")]
    pub generator: Generator,

    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Build the maze configuration, filling unset dimensions from `fallback`.
    pub fn maze_config(&self, fallback: (u16, u16)) -> MazeConfig {
        MazeConfig {
            width: self.width.unwrap_or(fallback.0),
            height: self.height.unwrap_or(fallback.1),
            cell_size: self.cell_size,
            max_cost: self.max_cost,
        }
    }
}

/// Read the seed from the environment. Unparsable values are ignored with a warning.
pub fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            tracing::warn!("ignoring {SEED_ENV}={raw:?}: not an unsigned integer");
            None
        }
    }
}
