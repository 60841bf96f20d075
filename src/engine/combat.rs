//! Multi-party combat resolution at every destination square.
//!
//! Modeling the incumbent garrison as just another entry in the forces map
//! makes "the defender defends with its units" fall out of the generic
//! tie-break rule with no special case. Each square resolves independently
//! from the same forces snapshot, so resolution is insensitive to the
//! order movements are supplied in.

use std::collections::HashMap;

use crate::engine::board::{Board, Square};
use crate::engine::geometry::Coordinate;
use crate::engine::movement::Movement;
use crate::engine::player::{Owner, PlayerId};
use crate::error::Result;

pub fn resolve_combat(board: &Board, movements: &[Movement]) -> Result<Board> {
    let mut forces: HashMap<Coordinate, HashMap<PlayerId, u32>> = HashMap::new();

    for c in board.coordinates() {
        let sq = board.get(c)?;
        if let Owner::Player(p) = sq.owner {
            forces.entry(c).or_default().insert(p, sq.units);
        }
    }
    for m in movements {
        *forces.entry(m.to).or_default().entry(m.owner).or_insert(0) += m.units;
    }

    let mut next = Board::empty(board.map_size());
    for c in board.coordinates() {
        let is_resource = board.get(c)?.is_resource;
        let square = match forces.get(&c) {
            None => Square::neutral(is_resource),
            Some(f) => resolve_square(f, is_resource),
        };
        next.set(c, square)?;
    }
    Ok(next)
}

fn resolve_square(forces: &HashMap<PlayerId, u32>, is_resource: bool) -> Square {
    let mut entries: Vec<(PlayerId, u32)> = forces.iter().map(|(&p, &u)| (p, u)).collect();
    if entries.is_empty() {
        return Square::neutral(is_resource);
    }
    if entries.len() == 1 {
        let (p, u) = entries[0];
        return Square::owned(u, p, is_resource);
    }

    // Stable, deterministic order for the top-two pick; which runner-up is
    // "second" among further-tied losers never affects the outcome.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let (leader, u1) = entries[0];
    let (_, u2) = entries[1];
    if u1 > u2 {
        Square::owned(u1 - u2, leader, is_resource)
    } else {
        Square::neutral(is_resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: usize) -> PlayerId {
        PlayerId::from_index(i)
    }

    #[test]
    fn uncontested_square_keeps_garrison() {
        let mut board = Board::empty(3);
        board.set(Coordinate::new(1, 1), Square::owned(4, p(0), false)).unwrap();
        let after = resolve_combat(&board, &[]).unwrap();
        assert_eq!(after.get(Coordinate::new(1, 1)).unwrap(), Square::owned(4, p(0), false));
    }

    #[test]
    fn single_attacker_takes_neutral_square() {
        let board = Board::empty(3);
        let movements =
            vec![Movement { from: Coordinate::new(0, 0), to: Coordinate::new(1, 0), owner: p(0), units: 5 }];
        let after = resolve_combat(&board, &movements).unwrap();
        assert_eq!(after.get(Coordinate::new(1, 0)).unwrap(), Square::owned(5, p(0), false));
    }

    #[test]
    fn tie_destroys_everyone() {
        let board = Board::empty(3);
        let movements = vec![
            Movement { from: Coordinate::new(0, 0), to: Coordinate::new(1, 0), owner: p(0), units: 5 },
            Movement { from: Coordinate::new(2, 0), to: Coordinate::new(1, 0), owner: p(1), units: 5 },
        ];
        let after = resolve_combat(&board, &movements).unwrap();
        assert_eq!(after.get(Coordinate::new(1, 0)).unwrap(), Square::neutral(false));
    }

    #[test]
    fn three_way_combat_leader_wins_by_margin() {
        let board = Board::empty(3);
        let movements = vec![
            Movement { from: Coordinate::new(0, 0), to: Coordinate::new(1, 1), owner: p(0), units: 10 },
            Movement { from: Coordinate::new(2, 0), to: Coordinate::new(1, 1), owner: p(1), units: 7 },
            Movement { from: Coordinate::new(0, 2), to: Coordinate::new(1, 1), owner: p(2), units: 5 },
        ];
        let after = resolve_combat(&board, &movements).unwrap();
        assert_eq!(after.get(Coordinate::new(1, 1)).unwrap(), Square::owned(3, p(0), false));
    }

    #[test]
    fn runner_up_is_annihilated_along_with_a_first_place_tie() {
        let board = Board::empty(3);
        let movements = vec![
            Movement { from: Coordinate::new(0, 0), to: Coordinate::new(1, 1), owner: p(0), units: 5 },
            Movement { from: Coordinate::new(2, 0), to: Coordinate::new(1, 1), owner: p(1), units: 5 },
            Movement { from: Coordinate::new(0, 2), to: Coordinate::new(1, 1), owner: p(2), units: 3 },
        ];
        let after = resolve_combat(&board, &movements).unwrap();
        assert_eq!(after.get(Coordinate::new(1, 1)).unwrap(), Square::neutral(false));
    }

    #[test]
    fn combat_is_order_independent() {
        let board = Board::empty(3);
        let forward = vec![
            Movement { from: Coordinate::new(0, 0), to: Coordinate::new(1, 1), owner: p(0), units: 10 },
            Movement { from: Coordinate::new(2, 0), to: Coordinate::new(1, 1), owner: p(1), units: 7 },
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(resolve_combat(&board, &forward).unwrap(), resolve_combat(&board, &reversed).unwrap());
    }

    #[test]
    fn is_resource_is_preserved() {
        let mut board = Board::empty(3);
        board.set(Coordinate::new(1, 1), Square::neutral(true)).unwrap();
        let movements =
            vec![Movement { from: Coordinate::new(0, 0), to: Coordinate::new(1, 1), owner: p(0), units: 2 }];
        let after = resolve_combat(&board, &movements).unwrap();
        assert!(after.get(Coordinate::new(1, 1)).unwrap().is_resource);
    }
}
