//! A thin example CLI shell over the engine: persists games as JSON and
//! exposes one subcommand per round-driver transition. Not part of the
//! engine's contract; see `crate::engine` for that.

pub mod render;
pub mod store;

use std::io::Read as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::engine::orders::OrderFailurePolicy;
use crate::engine::round::{GameState, Phase};
use crate::engine::oracle::Verdict;

#[derive(Clone, Debug, Parser)]
#[command(name = "territory", about = "Deterministic engine for a simultaneous-action territory game")]
pub struct Cli {
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Directory that holds one JSON file per game.
    #[arg(short, long, default_value = "./games")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Starts a new game with a freshly randomized board.
    Init {
        game_id: String,
        num_players: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Prints the current round, phase, and board.
    Show { game_id: String },
    /// Reads one declaration line per player from stdin and submits them.
    Declare { game_id: String },
    /// Reads one order line per player from stdin, submits them, and resolves the round.
    SubmitOrders {
        game_id: String,
        /// Treat a player's invalid order line as an empty submission instead of aborting.
        #[arg(long, default_value_t = false)]
        lenient: bool,
    },
    /// Reads one line per player from stdin and dispatches it to whichever of
    /// `declare`/`submit-orders` the game's current phase expects.
    Advance {
        game_id: String,
        #[arg(long, default_value_t = false)]
        lenient: bool,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("creating data directory {}", cli.data_dir.display()))?;

    match cli.command {
        Command::Init { game_id, num_players, seed } => cmd_init(&cli.data_dir, game_id, num_players, seed),
        Command::Show { game_id } => cmd_show(&cli.data_dir, &game_id),
        Command::Declare { game_id } => cmd_declare(&cli.data_dir, &game_id),
        Command::SubmitOrders { game_id, lenient } => cmd_submit_orders(&cli.data_dir, &game_id, lenient),
        Command::Advance { game_id, lenient } => cmd_advance(&cli.data_dir, &game_id, lenient),
    }
}

fn cmd_init(data_dir: &std::path::Path, game_id: String, num_players: usize, seed: Option<u64>) -> anyhow::Result<()> {
    if store::exists(data_dir, &game_id) {
        return Err(crate::error::EngineError::GameAlreadyExists { game_id }.into());
    }
    let config = Config::default();
    let game = match seed {
        Some(seed) => GameState::new_with_seed(game_id, config, num_players, seed)?,
        None => GameState::new(game_id, config, num_players)?,
    };
    store::save(data_dir, &game)?;
    println!("{}", render::summary(&game));
    Ok(())
}

fn cmd_show(data_dir: &std::path::Path, game_id: &str) -> anyhow::Result<()> {
    let game = store::load(data_dir, game_id)?;
    println!("{}", render::full(&game));
    Ok(())
}

fn cmd_declare(data_dir: &std::path::Path, game_id: &str) -> anyhow::Result<()> {
    let mut game = store::load(data_dir, game_id)?;
    let lines = read_stdin_lines(game.num_players)?;
    game.submit_declarations(&lines)?;
    store::save(data_dir, &game)?;
    println!("{}", render::summary(&game));
    Ok(())
}

fn cmd_submit_orders(data_dir: &std::path::Path, game_id: &str, lenient: bool) -> anyhow::Result<()> {
    let mut game = store::load(data_dir, game_id)?;
    let lines = read_stdin_lines(game.num_players)?;
    submit_orders_and_resolve(&mut game, &lines, lenient)?;
    store::save(data_dir, &game)?;
    println!("{}", render::summary(&game));
    if game.verdict != Verdict::Ongoing {
        println!("game over: {}", game.verdict);
    }
    Ok(())
}

/// Auto-detects whether the game is awaiting declarations or orders and
/// dispatches the same stdin lines accordingly.
fn cmd_advance(data_dir: &std::path::Path, game_id: &str, lenient: bool) -> anyhow::Result<()> {
    let mut game = store::load(data_dir, game_id)?;
    let lines = read_stdin_lines(game.num_players)?;
    match game.phase() {
        Phase::Declaring { .. } => {
            game.submit_declarations(&lines)?;
        }
        Phase::AwaitingOrders => {
            submit_orders_and_resolve(&mut game, &lines, lenient)?;
        }
    }
    store::save(data_dir, &game)?;
    println!("{}", render::summary(&game));
    if game.verdict != Verdict::Ongoing {
        println!("game over: {}", game.verdict);
    }
    Ok(())
}

fn submit_orders_and_resolve(game: &mut GameState, lines: &[String], lenient: bool) -> anyhow::Result<()> {
    let policy = if lenient { OrderFailurePolicy::TreatAsEmpty } else { OrderFailurePolicy::Reject };
    game.submit_orders(lines, policy)?;
    game.resolve()?;
    Ok(())
}

/// Reads `num_players` lines from stdin; a short read pads with empty lines
/// (the round driver treats those as empty submissions, so a player who
/// sends nothing doesn't block the others).
fn read_stdin_lines(num_players: usize) -> anyhow::Result<Vec<String>> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("reading declarations/orders from stdin")?;
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    lines.resize(num_players, String::new());
    Ok(lines)
}
