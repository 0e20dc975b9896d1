//! Error taxonomy shared by every module.
//!
//! Fallible operations return [`Result`]; a returned error always means
//! the operation was a no-op and the state it targeted is unchanged.

use thiserror::Error;

use crate::core::Mark;

/// Reasons a move is rejected by the rules engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IllegalMove {
    /// The target cell already holds a mark.
    #[error("cell {0} is already occupied")]
    Occupied(usize),

    /// The game (or target sub-board) is already won or drawn.
    #[error("the game is already over")]
    Terminal,

    /// It is not this mark's turn.
    #[error("it is not {0}'s turn")]
    OutOfTurn(Mark),

    /// Ultimate mode: a different sub-board is forced.
    #[error("play is forced into sub-board {required}")]
    WrongSubBoard { required: usize },
}

/// Any failure the engine can report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Grid construction rejected the requested dimensions.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A coordinate vector does not address a cell of the grid.
    #[error("coordinate {coords:?} is invalid for dimensions {dimensions:?}")]
    InvalidCoordinate {
        coords: Vec<u16>,
        dimensions: Vec<u16>,
    },

    /// A flat index is outside the addressable range.
    #[error("index {index} out of range for {total} cells")]
    IndexOutOfRange { index: usize, total: usize },

    /// A rules violation.
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
}

pub type Result<T> = std::result::Result<T, EngineError>;
