//! Compact line-oriented text codec for a `Board`.
//!
//! A board serializes as rows joined by `\n`; within a row, squares are
//! joined by `|`. Each square is a fixed-width token `NNps` with no
//! separators inside it: `NN` is a zero-padded decimal unit count of
//! width [`GRID_DIGIT_WIDTH`], `p` is the owner marker (`.` or `a..t`),
//! and `s` is the square-type marker (`.` normal, `+` resource).
//!
//! The codec is intentionally permissive about self-consistency (a
//! Neutral-marked square that carries nonzero units parses successfully)
//! so that `parse(serialize(b)) == b` and `serialize(parse(s)) == s` hold
//! for every `s` the parser accepts, even malformed-but-well-shaped ones.

use crate::engine::board::{Board, Square};
use crate::engine::player::Owner;
use crate::error::{EngineError, Result};

/// Fixed decimal width of the unit-count field. Chosen once per format
/// version; changing it breaks replay of any previously recorded game.
pub const GRID_DIGIT_WIDTH: usize = 2;

const TOKEN_LEN: usize = GRID_DIGIT_WIDTH + 2;

pub fn serialize(board: &Board) -> String {
    let n = board.map_size();
    (0..n)
        .map(|y| {
            (0..n)
                .map(|x| {
                    let c = crate::engine::geometry::Coordinate::new(x as i32, y as i32);
                    let sq = board.get(c).expect("coordinate within board bounds");
                    format_token(&sq)
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_token(sq: &Square) -> String {
    format!(
        "{:0width$}{}{}",
        sq.units,
        sq.owner.to_char(),
        if sq.is_resource { '+' } else { '.' },
        width = GRID_DIGIT_WIDTH
    )
}

pub fn parse(s: &str) -> Result<Board> {
    if s.trim().is_empty() {
        return Err(EngineError::invalid_grid(0, 0, "input is empty or whitespace-only"));
    }

    let rows: Vec<&str> = s.lines().collect();
    let n = rows.len();

    let mut cells = Vec::with_capacity(n * n);
    for (y, row) in rows.iter().enumerate() {
        let tokens: Vec<&str> = row.split('|').collect();
        if tokens.len() != n {
            return Err(EngineError::invalid_grid(
                y,
                0,
                format!("row has {} squares, expected {n} (board must be square)", tokens.len()),
            ));
        }
        for (x, token) in tokens.iter().enumerate() {
            cells.push(parse_token(y, x, token)?);
        }
    }

    let mut board = Board::empty(n);
    for (y, row) in cells.chunks(n).enumerate() {
        for (x, sq) in row.iter().enumerate() {
            let c = crate::engine::geometry::Coordinate::new(x as i32, y as i32);
            board.set(c, *sq)?;
        }
    }
    Ok(board)
}

fn parse_token(row: usize, col: usize, token: &str) -> Result<Square> {
    if token.len() != TOKEN_LEN {
        return Err(EngineError::invalid_grid(
            row,
            col,
            format!("token {token:?} has length {}, expected {TOKEN_LEN}", token.len()),
        ));
    }
    let chars: Vec<char> = token.chars().collect();
    let digits: String = chars[..GRID_DIGIT_WIDTH].iter().collect();
    let units: u32 = digits.parse().map_err(|_| {
        EngineError::invalid_grid(row, col, format!("unit digits {digits:?} are not decimal"))
    })?;

    let owner_char = chars[GRID_DIGIT_WIDTH];
    let owner = Owner::from_char(owner_char).ok_or_else(|| {
        EngineError::invalid_grid(row, col, format!("owner marker {owner_char:?} is not '.' or a player letter"))
    })?;

    let type_char = chars[GRID_DIGIT_WIDTH + 1];
    let is_resource = match type_char {
        '.' => false,
        '+' => true,
        other => {
            return Err(EngineError::invalid_grid(
                row,
                col,
                format!("type marker {other:?} is not '.' or '+'"),
            ))
        }
    };

    Ok(Square { units, owner, is_resource })
}
