//! JSON persistence for `GameState`, one file per game.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::engine::round::GameState;
use crate::error::EngineError;

fn path_for(data_dir: &Path, game_id: &str) -> PathBuf {
    data_dir.join(format!("{game_id}.json"))
}

pub fn exists(data_dir: &Path, game_id: &str) -> bool {
    path_for(data_dir, game_id).exists()
}

pub fn load(data_dir: &Path, game_id: &str) -> anyhow::Result<GameState> {
    let path = path_for(data_dir, game_id);
    if !path.exists() {
        return Err(EngineError::GameNotFound { game_id: game_id.to_string() }.into());
    }
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let game: GameState =
        serde_json::from_str(&text).with_context(|| format!("parsing {} as a game state", path.display()))?;
    Ok(game)
}

pub fn save(data_dir: &Path, game: &GameState) -> anyhow::Result<()> {
    let path = path_for(data_dir, &game.game_id);
    let text = serde_json::to_string_pretty(game).context("serializing game state")?;
    std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("saved game {} to {}", game.game_id, path.display());
    Ok(())
}
