//! Deterministic engine for a simultaneous-action territorial strategy game.
//!
//! The engine owns the round resolver and its state model: converting a
//! prior board plus a batch of per-player orders into a successor board,
//! a combat outcome, and (eventually) a terminal verdict. Persistence, the
//! terminal renderer, and any order-generating agent are host concerns that
//! live outside this crate's contract; see `cli` for a thin example shell.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::engine::board::{Board, Square};
    pub use crate::engine::geometry::{Coordinate, Direction};
    pub use crate::engine::oracle::Verdict;
    pub use crate::engine::orders::{Order, OrderFailurePolicy};
    pub use crate::engine::player::PlayerId;
    pub use crate::engine::round::{GameState, RoundRecord};
    pub use crate::error::{EngineError, Result};
}
