//! Initial board setup.
//!
//! The only place in the engine that touches an RNG. Everything downstream
//! of the first `RoundRecord` is a pure function of `(board, orders, config)`.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::config::Config;
use crate::engine::board::{Board, Square};
use crate::engine::geometry::Coordinate;
use crate::engine::player::PlayerId;
use crate::error::{EngineError, Result};

/// Builds the starting board: each player gets one randomly chosen, distinct
/// edge square with `startingUnits`; a `resourceSquareCount()` of the
/// remaining squares are marked as resource squares.
pub fn initial_setup(config: &Config, num_players: usize, rng: &mut SmallRng) -> Result<Board> {
    let mut board = Board::empty(config.map_size);

    let mut edges = board.edge_coordinates();
    if edges.len() < num_players {
        return Err(EngineError::invalid_config(format!(
            "a {0}x{0} board has only {1} edge squares, not enough for {num_players} players",
            config.map_size,
            edges.len()
        )));
    }
    edges.shuffle(rng);

    let starting: Vec<Coordinate> = edges.into_iter().take(num_players).collect();
    for (i, &c) in starting.iter().enumerate() {
        board.set(c, Square::owned(config.starting_units, PlayerId::from_index(i), false))?;
    }

    let mut remaining: Vec<Coordinate> = board.coordinates().filter(|c| !starting.contains(c)).collect();
    remaining.shuffle(rng);
    let resource_count = config.resource_square_count().min(remaining.len());
    for &c in remaining.iter().take(resource_count) {
        let sq = board.get(c)?;
        board.set(c, Square { units: sq.units, owner: sq.owner, is_resource: true })?;
    }

    Ok(board)
}
