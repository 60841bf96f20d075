//! Terminal rendering for a `GameState`. Diagnostic output only; not a wire
//! format (see `crate::engine::grid_codec` for that).

use crate::engine::round::GameState;

/// One line: round, phase, verdict.
pub fn summary(game: &GameState) -> String {
    format!(
        "game {} | round {} | phase {} | verdict {}",
        game.game_id,
        game.current_round,
        game.phase(),
        game.verdict
    )
}

/// `summary` plus a per-player unit total and the board.
pub fn full(game: &GameState) -> String {
    let totals = game.current_round_record().board_before.totals(game.num_players);
    let mut out = summary(game);
    out.push('\n');
    for (i, units) in totals.iter().enumerate() {
        let player = crate::engine::player::PlayerId::from_index(i);
        out.push_str(&format!("  {player}: {units} units\n"));
    }
    out.push_str(&game.current_round_record().board_before.pretty());
    out
}
