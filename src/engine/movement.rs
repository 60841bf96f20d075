//! Translating validated orders into atomic movements and debiting sources.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::board::{Board, Square};
use crate::engine::geometry::{neighbor, Coordinate};
use crate::engine::orders::Order;
use crate::engine::player::PlayerId;
use crate::error::{EngineError, Result};

/// A single unit transfer, decomposed from a validated order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub from: Coordinate,
    pub to: Coordinate,
    pub owner: PlayerId,
    pub units: u32,
}

/// Converts each player's validated orders into movements. Mechanical:
/// `to = neighbor(from, direction)` for every order.
pub fn orders_to_movements(orders_by_player: &[(PlayerId, Vec<Order>)]) -> Vec<Movement> {
    orders_by_player
        .iter()
        .flat_map(|(player, orders)| {
            orders.iter().map(move |order| Movement {
                from: order.from,
                to: neighbor(order.from, order.direction),
                owner: *player,
                units: order.units,
            })
        })
        .collect()
}

/// Debits every movement's source square, globally and before any
/// destination arithmetic. A source that reaches exactly 0 units becomes
/// Neutral. Because the validator enforces the cumulative-availability
/// invariant before movements are ever constructed, a negative result here
/// can only mean an internal bug, not a user-triggerable error.
pub fn debit_sources(board: &Board, movements: &[Movement]) -> Result<Board> {
    let mut departures: HashMap<Coordinate, u32> = HashMap::new();
    for m in movements {
        *departures.entry(m.from).or_insert(0) += m.units;
    }

    let mut next = board.clone();
    for (coord, leaving) in departures {
        let square = board.get(coord)?;
        let remaining = square.units.checked_sub(leaving).ok_or_else(|| {
            EngineError::bug(format!(
                "source {coord} has {} units but {leaving} are leaving; validator should have prevented this",
                square.units
            ))
        })?;
        let updated = if remaining == 0 {
            Square::neutral(square.is_resource)
        } else {
            Square { units: remaining, owner: square.owner, is_resource: square.is_resource }
        };
        next.set(coord, updated)?;
    }
    Ok(next)
}
