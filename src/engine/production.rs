//! Unit production on owned squares.
//!
//! `productionCap` gates on the pre-production unit count only; production
//! is never clamped back down to the cap once granted.

use crate::config::Config;
use crate::engine::board::{Board, Square};
use crate::engine::player::Owner;
use crate::error::Result;

pub fn apply_production(board: &Board, config: &Config) -> Result<Board> {
    let mut next = board.clone();
    for c in board.coordinates() {
        let sq = board.get(c)?;
        let Owner::Player(owner) = sq.owner else {
            continue;
        };
        if sq.units >= config.production_cap {
            continue;
        }
        let gain = if sq.is_resource { config.resource_production } else { config.base_production };
        next.set(c, Square { units: sq.units + gain, owner: Owner::Player(owner), is_resource: sq.is_resource })?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Coordinate;
    use crate::engine::player::PlayerId;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn neutral_squares_never_produce() {
        let board = Board::empty(3);
        let after = apply_production(&board, &cfg()).unwrap();
        assert_eq!(after, board);
    }

    #[test]
    fn normal_square_gains_base_production() {
        let mut board = Board::empty(3);
        let a = PlayerId::from_index(0);
        board.set(Coordinate::new(0, 0), Square::owned(7, a, false)).unwrap();
        let after = apply_production(&board, &cfg()).unwrap();
        assert_eq!(after.get(Coordinate::new(0, 0)).unwrap().units, 8);
    }

    #[test]
    fn resource_square_gains_resource_production() {
        let mut board = Board::empty(3);
        let a = PlayerId::from_index(0);
        board.set(Coordinate::new(0, 0), Square::owned(7, a, true)).unwrap();
        let after = apply_production(&board, &cfg()).unwrap();
        assert_eq!(after.get(Coordinate::new(0, 0)).unwrap().units, 9);
    }

    #[test]
    fn production_cap_is_a_threshold_not_a_clamp() {
        let a = PlayerId::from_index(0);
        let mut c = cfg();
        c.production_cap = 21;

        let mut below = Board::empty(3);
        below.set(Coordinate::new(0, 0), Square::owned(20, a, false)).unwrap();
        assert_eq!(apply_production(&below, &c).unwrap().get(Coordinate::new(0, 0)).unwrap().units, 21);

        let mut at_cap = Board::empty(3);
        at_cap.set(Coordinate::new(0, 0), Square::owned(21, a, false)).unwrap();
        assert_eq!(apply_production(&at_cap, &c).unwrap().get(Coordinate::new(0, 0)).unwrap().units, 21);

        let mut resource_below = Board::empty(3);
        resource_below.set(Coordinate::new(0, 0), Square::owned(20, a, true)).unwrap();
        assert_eq!(
            apply_production(&resource_below, &c).unwrap().get(Coordinate::new(0, 0)).unwrap().units,
            22
        );
    }
}
