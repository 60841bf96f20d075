//! Structured error kinds shared by every fallible core operation.
//!
//! The validator and resolver never panic on bad input; they return one of
//! these variants. `Bug` is the exception — it marks an internal invariant
//! violation that the core itself can no longer defend against and is not
//! meant to be handled by a caller.

use crate::engine::geometry::Coordinate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// The reason a single order token failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationKind {
    OutOfBounds { coord: Coordinate },
    TargetOutOfBounds { from: Coordinate, to: Coordinate },
    NotYourSquare { coord: Coordinate, owner: String },
    InsufficientUnits { coord: Coordinate, available: u32, attempted: u32 },
    TooManyOrders { max: usize, received: usize },
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationKind::OutOfBounds { coord } => {
                write!(f, "coordinate {coord} is out of bounds")
            }
            ValidationKind::TargetOutOfBounds { from, to } => {
                write!(f, "order from {from} targets {to}, which is out of bounds")
            }
            ValidationKind::NotYourSquare { coord, owner } => {
                write!(f, "square {coord} is not owned by the submitting player (owner: {owner})")
            }
            ValidationKind::InsufficientUnits { coord, available, attempted } => {
                write!(
                    f,
                    "square {coord} has {available} units but orders from it total {attempted}"
                )
            }
            ValidationKind::TooManyOrders { max, received } => {
                write!(f, "at most {max} orders are allowed per submission, received {received}")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("game {game_id} already exists")]
    GameAlreadyExists { game_id: String },

    #[error("game {game_id} not found")]
    GameNotFound { game_id: String },

    #[error("invalid grid format at row {row}, column {col}: {reason}")]
    InvalidGridFormat { row: usize, col: usize, reason: String },

    #[error("could not parse order token {token:?}: {reason}")]
    ParseError { token: String, reason: String },

    #[error("order validation failed: {kind}")]
    ValidationError { kind: ValidationKind },

    #[error("cannot {attempted} while in phase {phase}: {reason}")]
    PhaseError { phase: String, attempted: String, reason: String },

    #[error("internal invariant violated: {reason}")]
    Bug { reason: String },
}

impl EngineError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig { reason: reason.into() }
    }

    pub fn invalid_grid(row: usize, col: usize, reason: impl Into<String>) -> Self {
        EngineError::InvalidGridFormat { row, col, reason: reason.into() }
    }

    pub fn parse(token: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::ParseError { token: token.into(), reason: reason.into() }
    }

    pub fn validation(kind: ValidationKind) -> Self {
        EngineError::ValidationError { kind }
    }

    pub fn phase(phase: impl Into<String>, attempted: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::PhaseError { phase: phase.into(), attempted: attempted.into(), reason: reason.into() }
    }

    pub fn bug(reason: impl Into<String>) -> Self {
        EngineError::Bug { reason: reason.into() }
    }

    /// Stable small-integer exit code used by the CLI shell.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::InvalidConfig { .. } => 2,
            EngineError::InvalidGridFormat { .. } => 3,
            EngineError::ParseError { .. } => 4,
            EngineError::ValidationError { .. } => 5,
            EngineError::PhaseError { .. } => 6,
            EngineError::GameNotFound { .. } => 7,
            EngineError::GameAlreadyExists { .. } => 8,
            EngineError::Bug { .. } => 70,
        }
    }
}
