//! Per-player order line parsing and validation.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::config::Config;
use crate::engine::board::Board;
use crate::engine::geometry::{neighbor, Coordinate, Direction};
use crate::engine::player::{Owner, PlayerId};
use crate::error::{EngineError, Result, ValidationKind};

/// A single validated order: `units` leave `from` toward `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub from: Coordinate,
    pub direction: Direction,
    pub units: u32,
}

/// How the round driver handles a player whose order line fails to validate.
/// Both modes are host policy, not a core invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderFailurePolicy {
    /// Propagate the validation error to the caller.
    Reject,
    /// Treat the failing player as having submitted no orders this round.
    TreatAsEmpty,
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(-?\d+),(-?\d+),([UuDdLlRr]),(\d+)$").expect("static order token pattern is valid")
    })
}

/// Parses and validates one player's order line against the board as it
/// stood before any orders this round were applied. Pure over its inputs.
pub fn parse_order_line(line: &str, player: PlayerId, board: &Board, config: &Config) -> Result<Vec<Order>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let tokens: Vec<&str> = line.split('|').map(str::trim).collect();
    if tokens.len() > config.max_orders_per_round {
        return Err(EngineError::validation(ValidationKind::TooManyOrders {
            max: config.max_orders_per_round,
            received: tokens.len(),
        }));
    }

    let mut running_totals: HashMap<Coordinate, u32> = HashMap::new();
    let mut orders = Vec::with_capacity(tokens.len());

    for token in tokens {
        let captures = token_pattern().captures(token).ok_or_else(|| {
            EngineError::parse(token, "expected 'x,y,D,u' (D one of U/D/L/R, u a positive integer)")
        })?;

        let x: i32 = captures[1]
            .parse()
            .map_err(|_| EngineError::parse(token, "x coordinate is not an integer"))?;
        let y: i32 = captures[2]
            .parse()
            .map_err(|_| EngineError::parse(token, "y coordinate is not an integer"))?;
        let direction = Direction::parse(&captures[3])
            .ok_or_else(|| EngineError::parse(token, "direction is not one of U/D/L/R"))?;
        let units: u32 = captures[4]
            .parse()
            .map_err(|_| EngineError::parse(token, "unit count is not a positive integer"))?;
        if units == 0 {
            return Err(EngineError::parse(token, "unit count must be positive"));
        }

        let from = Coordinate::new(x, y);
        if !from.in_bounds(board.map_size()) {
            return Err(EngineError::validation(ValidationKind::OutOfBounds { coord: from }));
        }

        let source = board.get(from)?;
        if !source.owner.is_player(player) {
            return Err(EngineError::validation(ValidationKind::NotYourSquare {
                coord: from,
                owner: source.owner.to_string(),
            }));
        }

        let to = neighbor(from, direction);
        if !to.in_bounds(board.map_size()) {
            return Err(EngineError::validation(ValidationKind::TargetOutOfBounds { from, to }));
        }

        let running = running_totals.entry(from).or_insert(0);
        *running += units;
        if *running > source.units {
            return Err(EngineError::validation(ValidationKind::InsufficientUnits {
                coord: from,
                available: source.units,
                attempted: *running,
            }));
        }

        orders.push(Order { from, direction, units });
    }

    Ok(orders)
}

/// Applies [`OrderFailurePolicy`] around [`parse_order_line`]: under
/// `TreatAsEmpty`, a failing line degrades to no orders instead of
/// propagating the error.
pub fn parse_order_line_with_policy(
    line: &str,
    player: PlayerId,
    board: &Board,
    config: &Config,
    policy: OrderFailurePolicy,
) -> Result<Vec<Order>> {
    match parse_order_line(line, player, board, config) {
        Ok(orders) => Ok(orders),
        Err(err) => match policy {
            OrderFailurePolicy::Reject => Err(err),
            OrderFailurePolicy::TreatAsEmpty => {
                log::warn!("player {player} submitted invalid orders, treating as empty: {err}");
                Ok(Vec::new())
            }
        },
    }
}
