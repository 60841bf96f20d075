//! The board: a `map_size x map_size` grid of squares.

use crate::engine::geometry::Coordinate;
use crate::engine::player::{Owner, PlayerId};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// One cell of the board.
///
/// Invariant: `units == 0` if and only if `owner == Owner::Neutral`.
/// `is_resource` never changes for the life of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub units: u32,
    pub owner: Owner,
    pub is_resource: bool,
}

impl Square {
    pub fn neutral(is_resource: bool) -> Square {
        Square { units: 0, owner: Owner::Neutral, is_resource }
    }

    /// Builds an owned square, normalizing to neutral if `units` is 0.
    pub fn owned(units: u32, owner: PlayerId, is_resource: bool) -> Square {
        if units == 0 {
            Square::neutral(is_resource)
        } else {
            Square { units, owner: Owner::Player(owner), is_resource }
        }
    }
}

/// A `map_size x map_size` grid of squares, stored row-major (`index = y *
/// map_size + x`), matching the grid codec's row/column ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    map_size: usize,
    cells: Vec<Square>,
}

/// Boards serialize through their canonical grid text rather than as a raw
/// struct, so a persisted file stays readable as the grid wire format plus
/// a thin JSON envelope.
impl serde::Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&crate::engine::grid_codec::serialize(self))
    }
}

impl<'de> serde::Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        crate::engine::grid_codec::parse(&text).map_err(serde::de::Error::custom)
    }
}

impl Board {
    pub fn empty(map_size: usize) -> Board {
        Board { map_size, cells: vec![Square::neutral(false); map_size * map_size] }
    }

    pub fn map_size(&self) -> usize {
        self.map_size
    }

    fn index_of(&self, c: Coordinate) -> Result<usize> {
        if !c.in_bounds(self.map_size) {
            return Err(EngineError::bug(format!(
                "coordinate {c} is out of bounds for a {0}x{0} board",
                self.map_size
            )));
        }
        Ok(c.y as usize * self.map_size + c.x as usize)
    }

    pub fn get(&self, c: Coordinate) -> Result<Square> {
        self.index_of(c).map(|i| self.cells[i])
    }

    pub fn set(&mut self, c: Coordinate, square: Square) -> Result<()> {
        let i = self.index_of(c)?;
        self.cells[i] = square;
        Ok(())
    }

    /// All coordinates on the board, row by row then column by column.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let n = self.map_size as i32;
        (0..n).flat_map(move |y| (0..n).map(move |x| Coordinate::new(x, y)))
    }

    /// All coordinates on the outer edge (used by initial setup).
    pub fn edge_coordinates(&self) -> Vec<Coordinate> {
        let n = self.map_size as i32;
        self.coordinates()
            .filter(|c| c.x == 0 || c.y == 0 || c.x == n - 1 || c.y == n - 1)
            .collect()
    }

    /// Total units held by each player, indexed by player ordinal.
    pub fn totals(&self, num_players: usize) -> Vec<u32> {
        let mut totals = vec![0u32; num_players];
        for square in &self.cells {
            if let Owner::Player(p) = square.owner {
                if p.index() < num_players {
                    totals[p.index()] += square.units;
                }
            }
        }
        totals
    }

    /// Renders the board as fixed-width rows for diagnostics; not the wire
    /// format (see `grid_codec`), just a human-readable dump.
    pub fn pretty(&self) -> String {
        self.cells
            .chunks(self.map_size)
            .map(|row| {
                row.iter()
                    .map(|sq| format!("{:02}{}{}", sq.units, sq.owner, if sq.is_resource { '+' } else { '.' }))
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_is_all_neutral() {
        let b = Board::empty(5);
        for c in b.coordinates() {
            assert_eq!(b.get(c).unwrap(), Square::neutral(false));
        }
    }

    #[test]
    fn owned_with_zero_units_normalizes_to_neutral() {
        let sq = Square::owned(0, PlayerId::from_index(0), false);
        assert_eq!(sq, Square::neutral(false));
    }

    #[test]
    fn edge_coordinates_cover_the_border_only() {
        let b = Board::empty(3);
        let edges = b.edge_coordinates();
        assert_eq!(edges.len(), 8); // 3x3 has 1 interior cell
        assert!(!edges.contains(&Coordinate::new(1, 1)));
    }

    #[test]
    fn totals_sum_per_player() {
        let mut b = Board::empty(2);
        b.set(Coordinate::new(0, 0), Square::owned(3, PlayerId::from_index(0), false)).unwrap();
        b.set(Coordinate::new(1, 1), Square::owned(4, PlayerId::from_index(0), false)).unwrap();
        b.set(Coordinate::new(1, 0), Square::owned(2, PlayerId::from_index(1), false)).unwrap();
        assert_eq!(b.totals(2), vec![7, 2]);
    }

    #[test]
    fn out_of_bounds_get_errors() {
        let b = Board::empty(3);
        assert!(b.get(Coordinate::new(5, 5)).is_err());
    }
}
