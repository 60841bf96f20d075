//! Coordinate arithmetic and direction semantics.

use serde::{Deserialize, Serialize};

/// A board coordinate. Kept signed so that `neighbor` can represent a
/// result that has stepped off the edge of the board without wrapping;
/// callers check `in_bounds` before trusting it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Whether this coordinate lies within a `map_size x map_size` board.
    pub fn in_bounds(&self, map_size: usize) -> bool {
        let n = map_size as i32;
        self.x >= 0 && self.x < n && self.y >= 0 && self.y < n
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal movement directions. `U` decreases `y`, `D`
/// increases `y`, `L` decreases `x`, `R` increases `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    U,
    D,
    L,
    R,
}

impl Direction {
    /// Parses a direction letter, case-insensitively.
    pub fn parse(s: &str) -> Option<Direction> {
        match s.to_ascii_uppercase().as_str() {
            "U" => Some(Direction::U),
            "D" => Some(Direction::D),
            "L" => Some(Direction::L),
            "R" => Some(Direction::R),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Direction::U => 'U',
            Direction::D => 'D',
            Direction::L => 'L',
            Direction::R => 'R',
        };
        write!(f, "{c}")
    }
}

/// Applies `d` to `c`. The result may be out of bounds; it is the
/// caller's responsibility to check `in_bounds` before indexing a board.
pub fn neighbor(c: Coordinate, d: Direction) -> Coordinate {
    match d {
        Direction::U => Coordinate::new(c.x, c.y - 1),
        Direction::D => Coordinate::new(c.x, c.y + 1),
        Direction::L => Coordinate::new(c.x - 1, c.y),
        Direction::R => Coordinate::new(c.x + 1, c.y),
    }
}
