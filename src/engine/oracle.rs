//! Terminal-condition oracle.
//!
//! Priority is annihilation, then domination, then timeout; "last player
//! standing" is not a distinct rule, it is just domination with one
//! nonzero total.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::engine::board::Board;
use crate::engine::player::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Ongoing,
    Winner(PlayerId),
    MultiWinner(Vec<PlayerId>),
    Draw,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Ongoing => write!(f, "ongoing"),
            Verdict::Winner(p) => write!(f, "winner {p}"),
            Verdict::MultiWinner(ps) => {
                let names: Vec<String> = ps.iter().map(PlayerId::to_string).collect();
                write!(f, "multi-winner [{}]", names.join(", "))
            }
            Verdict::Draw => write!(f, "draw"),
        }
    }
}

/// Decides the verdict for a board at the end of a resolved round.
pub fn evaluate(board: &Board, num_players: usize, current_round: u32, config: &Config) -> Verdict {
    let totals = board.totals(num_players);
    let total: u32 = totals.iter().sum();

    if total == 0 {
        return Verdict::Draw;
    }

    for (index, &units) in totals.iter().enumerate() {
        if (units as u64) * 2 > total as u64 {
            return Verdict::Winner(PlayerId::from_index(index));
        }
    }

    if current_round >= config.max_rounds {
        let max = *totals.iter().max().unwrap();
        let leaders: Vec<PlayerId> = totals
            .iter()
            .enumerate()
            .filter(|&(_, &units)| units == max)
            .map(|(index, _)| PlayerId::from_index(index))
            .collect();
        return if leaders.len() == 1 {
            Verdict::Winner(leaders[0])
        } else {
            Verdict::MultiWinner(leaders)
        };
    }

    Verdict::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::board::Square;
    use crate::engine::geometry::Coordinate;

    fn p(i: usize) -> PlayerId {
        PlayerId::from_index(i)
    }

    #[test]
    fn annihilation_is_a_draw_at_any_round() {
        let board = Board::empty(3);
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 3, 0, &cfg), Verdict::Draw);
        assert_eq!(evaluate(&board, 3, 999, &cfg), Verdict::Draw);
    }

    #[test]
    fn strict_majority_wins_immediately() {
        let mut board = Board::empty(5);
        board.set(Coordinate::new(0, 0), Square::owned(21, p(0), false)).unwrap();
        board.set(Coordinate::new(1, 0), Square::owned(2, p(1), false)).unwrap();
        board.set(Coordinate::new(2, 0), Square::owned(2, p(2), false)).unwrap();
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 3, 1, &cfg), Verdict::Winner(p(0)));
    }

    #[test]
    fn exact_half_is_not_domination() {
        let mut board = Board::empty(5);
        board.set(Coordinate::new(0, 0), Square::owned(10, p(0), false)).unwrap();
        board.set(Coordinate::new(1, 0), Square::owned(10, p(1), false)).unwrap();
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 2, 1, &cfg), Verdict::Ongoing);
    }

    #[test]
    fn timeout_breaks_ties_into_multiwinner() {
        let mut board = Board::empty(5);
        board.set(Coordinate::new(0, 0), Square::owned(10, p(0), false)).unwrap();
        board.set(Coordinate::new(1, 0), Square::owned(10, p(1), false)).unwrap();
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 2, cfg.max_rounds, &cfg), Verdict::MultiWinner(vec![p(0), p(1)]));
    }

    #[test]
    fn timeout_with_single_leader_is_a_winner() {
        let mut board = Board::empty(5);
        board.set(Coordinate::new(0, 0), Square::owned(10, p(0), false)).unwrap();
        board.set(Coordinate::new(1, 0), Square::owned(4, p(1), false)).unwrap();
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 2, cfg.max_rounds, &cfg), Verdict::Winner(p(0)));
    }

    #[test]
    fn last_player_standing_is_just_domination() {
        let mut board = Board::empty(5);
        board.set(Coordinate::new(0, 0), Square::owned(3, p(0), false)).unwrap();
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 3, 1, &cfg), Verdict::Winner(p(0)));
    }

    #[test]
    fn below_max_rounds_stays_ongoing_without_domination() {
        let mut board = Board::empty(5);
        board.set(Coordinate::new(0, 0), Square::owned(5, p(0), false)).unwrap();
        board.set(Coordinate::new(1, 0), Square::owned(5, p(1), false)).unwrap();
        let cfg = Config::default();
        assert_eq!(evaluate(&board, 2, cfg.max_rounds - 1, &cfg), Verdict::Ongoing);
    }
}
