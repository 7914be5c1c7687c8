//! Error types for the tic-tac-toe engine

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {index} is out of bounds (must be 0-8)")]
    OutOfRange { index: usize },

    #[error("cell {index} is already occupied")]
    Occupied { index: usize },

    #[error("no move to undo")]
    NothingToUndo,

    #[error("board has {got} cells, expected {expected}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at cell {position}")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("input closed while waiting for a {waiting_for}")]
    InputClosed { waiting_for: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
