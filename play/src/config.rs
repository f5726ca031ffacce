//! Configuration for the play binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_engine_first() -> bool {
    CENTRAL_CONFIG.play.engine_first
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "play")]
#[command(about = "Play tic-tac-toe against a UCT Monte Carlo Tree Search engine")]
#[command(
    long_about = "Play tic-tac-toe against a UCT engine. Enter cells 1-9 (row-major),
or 'exit' to quit.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Iterations per engine move (replaces any configured time limit)
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Milliseconds per engine move (replaces any configured iteration limit)
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// UCT exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Let the engine open the game as X
    #[arg(long, default_value_t = default_engine_first())]
    pub engine_first: bool,

    /// Seed for reproducible engine play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Search limits from config.toml and the environment
    #[arg(skip = CENTRAL_CONFIG.mcts.limits())]
    pub configured_limits: (Option<u32>, Option<u64>),

    /// Seed from config.toml and the environment
    #[arg(skip = CENTRAL_CONFIG.play.seed)]
    pub configured_seed: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.mcts_config()?;

        Ok(())
    }

    /// Effective `(iteration_limit, time_limit_ms)`.
    ///
    /// A limit given on the command line replaces the configured pair.
    pub fn limits(&self) -> (Option<u32>, Option<u64>) {
        match (self.iterations, self.time_limit_ms) {
            (None, None) => self.configured_limits,
            given => given,
        }
    }

    /// Build the validated engine configuration.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let (iterations, time_limit_ms) = self.limits();
        MctsConfig::new(
            self.exploration,
            iterations,
            time_limit_ms.map(Duration::from_millis),
        )
        .context("invalid search configuration")
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed.or(self.configured_seed)
    }
}
