//! The round resolver: state model, order validation, and the phases that
//! turn a prior board plus a batch of orders into a successor board.

pub mod board;
pub mod combat;
pub mod geometry;
pub mod grid_codec;
pub mod movement;
pub mod oracle;
pub mod orders;
pub mod player;
pub mod production;
pub mod round;
pub mod setup;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{EngineError, Result, ValidationKind};

    pub use super::board::{Board, Square};
    pub use super::combat;
    pub use super::geometry::{Coordinate, Direction};
    pub use super::grid_codec;
    pub use super::movement::Movement;
    pub use super::oracle::{self, Verdict};
    pub use super::orders::{Order, OrderFailurePolicy};
    pub use super::player::PlayerId;
    pub use super::production;
    pub use super::round::{GameState, Phase, RoundRecord};
    pub use super::setup;
}
