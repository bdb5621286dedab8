use thiserror::Error;

use crate::{generators::Generator, maze::Cell};

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("solvers need a carved maze, but the active generator is {generator}")]
    SolverUnavailable { generator: Generator },

    #[error("the maze is still being carved")]
    MazeNotCarved,

    #[error("cell {cell} is outside the {rows}x{cols} maze")]
    CellOutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MazeError {
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
