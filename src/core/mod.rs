//! Core types: marks, variant configuration, deterministic RNG.

mod mark;
mod options;
mod rng;

pub use mark::Mark;
pub use options::{Game, GameOptions};
pub use rng::GameRng;
