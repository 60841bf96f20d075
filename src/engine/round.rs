//! The round driver: phase state machine and per-round bookkeeping.
//!
//! ```text
//! Declaring(phase = 1..declarationCount) -> AwaitingOrders -> Resolving
//!   -> either (verdict = Ongoing) append a fresh round, back to Declaring(1)
//!   or        (verdict = terminal) freeze: no further phase transitions
//! ```

use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::engine::board::Board;
use crate::engine::combat;
use crate::engine::movement;
use crate::engine::oracle::{self, Verdict};
use crate::engine::orders::{self, Order, OrderFailurePolicy};
use crate::engine::player::PlayerId;
use crate::engine::production;
use crate::engine::setup;
use crate::error::{EngineError, Result};

/// Where a round currently sits in the declare/order/resolve cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Declaring { completed: u32 },
    AwaitingOrders,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Declaring { completed } => write!(f, "declaring ({completed} phase(s) done)"),
            Phase::AwaitingOrders => write!(f, "awaiting_orders"),
        }
    }
}

/// One round's worth of state: the board it started from, the
/// declarations issued during it, and the orders submitted for it.
///
/// `board_before` is the state *at the start of the round, before orders
/// execute* — after resolution, a new `RoundRecord` is appended whose
/// `board_before` is the post-resolution board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub declarations: Vec<String>,
    pub orders: Vec<Vec<Order>>,
    pub orders_submitted: bool,
    pub board_before: Board,
}

impl RoundRecord {
    fn new(round_number: u32, num_players: usize, board_before: Board) -> RoundRecord {
        RoundRecord {
            round_number,
            declarations: Vec::new(),
            orders: vec![Vec::new(); num_players],
            orders_submitted: false,
            board_before,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub config: Config,
    pub num_players: usize,
    pub current_round: u32,
    pub rounds: Vec<RoundRecord>,
    pub verdict: Verdict,
    phase: Phase,
}

impl GameState {
    /// Initializes a new game using entropy-seeded randomness for setup.
    /// Only setup is random; everything after this is a pure function of
    /// `(board, orders, config)`.
    pub fn new(game_id: impl Into<String>, config: Config, num_players: usize) -> Result<GameState> {
        let mut rng = rand::rngs::SmallRng::from_os_rng();
        Self::new_with_rng(game_id, config, num_players, &mut rng)
    }

    /// Like `new`, but with an explicit seed, for reproducible tests and replays.
    pub fn new_with_seed(
        game_id: impl Into<String>,
        config: Config,
        num_players: usize,
        seed: u64,
    ) -> Result<GameState> {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        Self::new_with_rng(game_id, config, num_players, &mut rng)
    }

    fn new_with_rng(
        game_id: impl Into<String>,
        config: Config,
        num_players: usize,
        rng: &mut rand::rngs::SmallRng,
    ) -> Result<GameState> {
        let config = Config::new(config)?;
        config.validate_num_players(num_players)?;

        let board = setup::initial_setup(&config, num_players, rng)?;
        log::info!("initialized game with {num_players} players on a {0}x{0} board", config.map_size);

        Ok(GameState {
            game_id: game_id.into(),
            config,
            num_players,
            current_round: 1,
            rounds: vec![RoundRecord::new(1, num_players, board)],
            verdict: Verdict::Ongoing,
            phase: Phase::Declaring { completed: 0 },
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_round_record(&self) -> &RoundRecord {
        self.rounds.last().expect("a GameState always has at least one round")
    }

    fn current_round_record_mut(&mut self) -> &mut RoundRecord {
        self.rounds.last_mut().expect("a GameState always has at least one round")
    }

    fn require_ongoing(&self, attempted: &str) -> Result<()> {
        if self.verdict != Verdict::Ongoing {
            return Err(EngineError::phase(
                self.verdict.to_string(),
                attempted,
                "the game has already reached a terminal verdict",
            ));
        }
        Ok(())
    }

    /// Appends one declaration per player to the current round and advances
    /// the declaration phase counter.
    pub fn submit_declarations(&mut self, lines: &[String]) -> Result<()> {
        self.require_ongoing("submit_declarations")?;

        let completed = match self.phase {
            Phase::Declaring { completed } if completed < self.config.declaration_count => completed,
            phase => {
                return Err(EngineError::phase(
                    phase.to_string(),
                    "submit_declarations",
                    "declarations are not accepted in this phase",
                ))
            }
        };

        let num_players = self.num_players;
        let max_len = self.config.max_plan_length;
        if lines.len() != num_players {
            log::warn!(
                "expected {num_players} declaration lines, got {}; missing lines are treated as empty",
                lines.len()
            );
        }

        let cleaned: Vec<String> = (0..num_players)
            .map(|i| sanitize_declaration(lines.get(i).map(String::as_str).unwrap_or(""), max_len))
            .collect();

        self.current_round_record_mut().declarations.extend(cleaned);

        let completed = completed + 1;
        self.phase = if completed >= self.config.declaration_count {
            Phase::AwaitingOrders
        } else {
            Phase::Declaring { completed }
        };
        log::debug!("game {}: declaration phase {completed} complete", self.game_id);
        Ok(())
    }

    /// Validates and stores one order line per player for the current round.
    pub fn submit_orders(&mut self, lines: &[String], policy: OrderFailurePolicy) -> Result<()> {
        self.require_ongoing("submit_orders")?;

        if self.phase != Phase::AwaitingOrders {
            return Err(EngineError::phase(
                self.phase.to_string(),
                "submit_orders",
                "declarations must be complete before orders are accepted",
            ));
        }
        if self.current_round_record().orders_submitted {
            return Err(EngineError::phase(
                self.phase.to_string(),
                "submit_orders",
                "orders have already been submitted for this round",
            ));
        }

        let num_players = self.num_players;
        if lines.len() != num_players {
            log::warn!(
                "expected {num_players} order lines, got {}; missing lines are treated as empty",
                lines.len()
            );
        }

        let board = self.current_round_record().board_before.clone();
        let mut parsed = Vec::with_capacity(num_players);
        for i in 0..num_players {
            let line = lines.get(i).map(String::as_str).unwrap_or("");
            let player = PlayerId::from_index(i);
            let orders = orders::parse_order_line_with_policy(line, player, &board, &self.config, policy)?;
            log::debug!("game {}: player {player} submitted {} order(s)", self.game_id, orders.len());
            parsed.push(orders);
        }

        let round = self.current_round_record_mut();
        round.orders = parsed;
        round.orders_submitted = true;
        Ok(())
    }

    /// Resolves the current round: movement, combat, production, then the
    /// terminal-condition oracle. Either appends the next round or freezes
    /// the game on a terminal verdict.
    pub fn resolve(&mut self) -> Result<Verdict> {
        self.require_ongoing("resolve")?;
        if self.phase != Phase::AwaitingOrders || !self.current_round_record().orders_submitted {
            return Err(EngineError::phase(
                self.phase.to_string(),
                "resolve",
                "orders must be submitted before a round can resolve",
            ));
        }

        let round = self.current_round_record();
        let board_before = round.board_before.clone();
        let total_before: u32 = board_before.totals(self.num_players).iter().sum();

        let orders_by_player: Vec<(PlayerId, Vec<Order>)> = round
            .orders
            .iter()
            .enumerate()
            .map(|(i, orders)| (PlayerId::from_index(i), orders.clone()))
            .collect();

        let movements = movement::orders_to_movements(&orders_by_player);
        let debited = movement::debit_sources(&board_before, &movements)?;
        let fought = combat::resolve_combat(&debited, &movements)?;
        let produced = production::apply_production(&fought, &self.config)?;

        let verdict = oracle::evaluate(&produced, self.num_players, self.current_round, &self.config);
        let total_after: u32 = produced.totals(self.num_players).iter().sum();
        log::info!(
            "game {}: round {} resolved ({total_before} -> {total_after} units); verdict: {verdict}",
            self.game_id,
            self.current_round
        );

        self.verdict = verdict.clone();
        match &verdict {
            Verdict::Ongoing => {
                self.current_round += 1;
                self.rounds.push(RoundRecord::new(self.current_round, self.num_players, produced));
                self.phase = Phase::Declaring { completed: 0 };
            }
            terminal => {
                log::info!("game {} over: {terminal}", self.game_id);
            }
        }

        Ok(verdict)
    }
}

fn sanitize_declaration(text: &str, max_len: usize) -> String {
    let collapsed: String = text.chars().map(|c| if c == '\n' || c == '\t' { ' ' } else { c }).collect();
    collapsed.chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(num_players: usize) -> GameState {
        GameState::new_with_seed("g1", Config::default(), num_players, 42).unwrap()
    }

    #[test]
    fn declarations_then_orders_then_resolve_advances_the_round() {
        let mut game = new_game(3);
        let empty = vec![String::new(); 3];
        game.submit_declarations(&empty).unwrap();
        game.submit_orders(&empty, OrderFailurePolicy::Reject).unwrap();
        let verdict = game.resolve().unwrap();
        assert_eq!(verdict, Verdict::Ongoing);
        assert_eq!(game.current_round, 2);
        assert_eq!(game.phase(), Phase::Declaring { completed: 0 });
    }

    #[test]
    fn orders_before_declarations_is_a_phase_error() {
        let mut game = new_game(3);
        let empty = vec![String::new(); 3];
        let err = game.submit_orders(&empty, OrderFailurePolicy::Reject).unwrap_err();
        assert!(matches!(err, EngineError::PhaseError { .. }));
    }

    #[test]
    fn declaring_requires_all_phases_before_orders() {
        let mut config = Config::default();
        config.declaration_count = 2;
        let mut game = GameState::new_with_seed("g1", config, 3, 1).unwrap();
        let empty = vec![String::new(); 3];
        game.submit_declarations(&empty).unwrap();
        assert_eq!(game.phase(), Phase::Declaring { completed: 1 });
        assert!(game.submit_orders(&empty, OrderFailurePolicy::Reject).is_err());
        game.submit_declarations(&empty).unwrap();
        assert_eq!(game.phase(), Phase::AwaitingOrders);
        assert!(game.submit_orders(&empty, OrderFailurePolicy::Reject).is_ok());
    }

    #[test]
    fn double_order_submission_is_rejected() {
        let mut game = new_game(3);
        let empty = vec![String::new(); 3];
        game.submit_declarations(&empty).unwrap();
        game.submit_orders(&empty, OrderFailurePolicy::Reject).unwrap();
        assert!(game.submit_orders(&empty, OrderFailurePolicy::Reject).is_err());
    }

    #[test]
    fn declarations_are_truncated_and_collapsed() {
        let mut config = Config::default();
        config.max_plan_length = 5;
        let mut game = GameState::new_with_seed("g1", config, 3, 1).unwrap();
        let lines = vec!["a\nb\tc".to_string(), "".to_string(), "".to_string()];
        game.submit_declarations(&lines).unwrap();
        assert_eq!(game.current_round_record().declarations[0], "a b c");
    }

    #[test]
    fn no_transitions_after_terminal_verdict() {
        let mut config = Config::default();
        config.max_rounds = 1;
        let mut game = GameState::new_with_seed("g1", config, 3, 7).unwrap();
        let empty = vec![String::new(); 3];
        game.submit_declarations(&empty).unwrap();
        game.submit_orders(&empty, OrderFailurePolicy::Reject).unwrap();
        game.resolve().unwrap();
        assert_ne!(game.verdict, Verdict::Ongoing);
        assert!(game.submit_declarations(&empty).is_err());
        assert!(game.submit_orders(&empty, OrderFailurePolicy::Reject).is_err());
        assert!(game.resolve().is_err());
    }

    #[test]
    fn current_round_tracks_rounds_length() {
        let mut game = new_game(3);
        assert_eq!(game.current_round as usize, game.rounds.len());
        let empty = vec![String::new(); 3];
        game.submit_declarations(&empty).unwrap();
        game.submit_orders(&empty, OrderFailurePolicy::Reject).unwrap();
        game.resolve().unwrap();
        assert_eq!(game.current_round as usize, game.rounds.len());
    }
}
