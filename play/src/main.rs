//! Play - interactive tic-tac-toe against the UCT engine
//!
//! Reads cell numbers from stdin, answers with an MCTS move, and announces
//! wins and draws with an offer to restart.

use std::io;

use anyhow::Result;
use clap::Parser;
use mcts::Mcts;
use tracing::info;
use tracing_subscriber::fmt::MakeWriter;

mod config;
mod game_loop;

use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout belongs to the game board
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Warn-level subscriber used until the configured log level is known.
fn bootstrap_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(tracing::Level::WARN)
        .finish()
}

/// Parse the command line, which also loads config.toml and `UCT_*` overrides.
///
/// The global subscriber depends on the parsed log level, so loader warnings
/// go through a scoped stderr subscriber instead of being dropped.
fn parse_config() -> Config {
    tracing::subscriber::with_default(bootstrap_subscriber(io::stderr), Config::parse)
}

fn main() -> Result<()> {
    // Parse configuration
    let config = parse_config();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let search = config.mcts_config()?;
    info!(
        exploration_constant = search.exploration_constant(),
        iteration_limit = ?search.iteration_limit(),
        time_limit = ?search.time_limit(),
        engine_first = config.engine_first,
        "Starting game"
    );

    let mut engine = match config.seed() {
        Some(seed) => Mcts::with_seed(search, seed),
        None => Mcts::new(search),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    game_loop::run(&mut engine, config.engine_first, stdin.lock(), stdout.lock())
}
