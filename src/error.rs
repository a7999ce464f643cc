use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("this game only works in an interactive terminal")]
    NotATerminal,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("could not access high score file {}: {source}", path.display())]
    HighScore { path: PathBuf, source: io::Error },

    #[error("snake underflow: tried to shrink an empty snake")]
    SnakeUnderflow,

    #[error(transparent)]
    Full(#[from] SnakeFull),
}

/// The snake already covers every cell of the grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the snake fills the whole grid")]
pub struct SnakeFull;
