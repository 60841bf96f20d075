//! Game configuration: recognized options and the bounds checked at init.
//!
//! `Config::new` is the only fallible constructor; `Config::default()`
//! matches the documented default scenario.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub min_players: usize,
    pub max_players: usize,
    pub map_size: usize,
    pub max_rounds: u32,
    pub starting_units: u32,
    pub max_plan_length: usize,
    pub declaration_count: u32,
    pub max_orders_per_round: usize,
    pub resource_square_pct: u32,
    pub base_production: u32,
    pub resource_production: u32,
    pub production_cap: u32,
    /// Advisory metadata only; no core logic consumes this.
    pub round_duration_hours: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_players: 3,
            max_players: 20,
            map_size: 5,
            max_rounds: 15,
            starting_units: 5,
            max_plan_length: 280,
            declaration_count: 1,
            max_orders_per_round: 10,
            resource_square_pct: 10,
            base_production: 1,
            resource_production: 2,
            production_cap: 21,
            round_duration_hours: 24,
        }
    }
}

impl Config {
    /// Validates the configuration, returning `EngineError::InvalidConfig` on the
    /// first violated bound.
    pub fn new(raw: Config) -> Result<Self> {
        if raw.map_size < 2 {
            return Err(EngineError::invalid_config(format!(
                "mapSize must be >= 2, got {}",
                raw.map_size
            )));
        }
        if raw.min_players > raw.max_players {
            return Err(EngineError::invalid_config(format!(
                "minPlayers ({}) must not exceed maxPlayers ({})",
                raw.min_players, raw.max_players
            )));
        }
        if raw.max_players > 20 {
            return Err(EngineError::invalid_config(format!(
                "maxPlayers must be <= 20, got {}",
                raw.max_players
            )));
        }
        if raw.declaration_count < 1 {
            return Err(EngineError::invalid_config(
                "declarationCount must be >= 1",
            ));
        }
        if raw.max_orders_per_round == 0 {
            return Err(EngineError::invalid_config(
                "maxOrdersPerRound must be >= 1",
            ));
        }
        if raw.resource_square_pct > 100 {
            return Err(EngineError::invalid_config(format!(
                "resourceSquarePct must be within 0..=100, got {}",
                raw.resource_square_pct
            )));
        }
        if raw.production_cap == 0 {
            return Err(EngineError::invalid_config("productionCap must be >= 1"));
        }
        Ok(raw)
    }

    /// Number of resource squares to place at setup: `ceil(mapSize^2 * pct / 100)`.
    pub fn resource_square_count(&self) -> usize {
        let total_cells = self.map_size * self.map_size;
        let numerator = total_cells * self.resource_square_pct as usize;
        numerator.div_ceil(100)
    }

    pub fn validate_num_players(&self, num_players: usize) -> Result<()> {
        if num_players < self.min_players || num_players > self.max_players {
            return Err(EngineError::invalid_config(format!(
                "numPlayers {} is outside [{}, {}]",
                num_players, self.min_players, self.max_players
            )));
        }
        Ok(())
    }
}
