//! # hypergrid
//!
//! An N-dimensional tic-tac-toe engine: any number of axes, any axis
//! lengths, classic and Ultimate (nested) rules, with pluggable computer
//! opponents.
//!
//! ## Design Principles
//!
//! 1. **Geometry Once**: A [`Grid`] precomputes every winning line and a
//!    per-cell line index at construction. Move legality and win checks
//!    never re-derive geometry.
//!
//! 2. **Failed Operations Are No-Ops**: Every fallible operation either
//!    fully applies or returns an error leaving state untouched. There
//!    are no partially applied moves.
//!
//! 3. **Deterministic Where It Counts**: Board evolution is a pure
//!    function of the move sequence; randomness lives only in the AI and
//!    is always seeded.
//!
//! ## Architecture
//!
//! - **Mixed-Radix Addressing**: Cells are addressed either by
//!   coordinate vector or by flat index, with axis 0 most significant.
//!
//! - **Shared Scratch Search**: Minimax simulates moves on one buffer
//!   and undoes them, rather than cloning the board per branch.
//!
//! ## Modules
//!
//! - `core`: Marks, game options, seeded RNG
//! - `grid`: Coordinate engine and winning-line generation
//! - `board`: Single-board state machine and rules
//! - `ultimate`: Nested sub-board composition with a derived meta board
//! - `ai`: Random, heuristic, and minimax opponents
//! - `error`: Error taxonomy shared by all modules

pub mod ai;
pub mod board;
pub mod core;
pub mod error;
pub mod grid;
pub mod ultimate;

// Re-export commonly used types
pub use crate::core::{Game, GameOptions, GameRng, Mark};

pub use crate::grid::{CellIndex, Coords, Grid, Line, LineKind};

pub use crate::board::{BoardState, MoveOutcome, Status};

pub use crate::ultimate::{UltimateBoard, UltimateOutcome};

pub use crate::ai::{choose_move, choose_move_ultimate, AiConfig, Difficulty};

pub use crate::error::{EngineError, IllegalMove, Result};
