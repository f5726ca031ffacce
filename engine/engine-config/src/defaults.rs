//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the binary and the documentation ship identical default values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    play: PlayDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration_constant: f64,
    #[serde(default)]
    iteration_limit: Option<u32>,
    #[serde(default)]
    time_limit_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PlayDefaults {
    engine_first: bool,
    #[serde(default)]
    seed: Option<u64>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn iteration_limit() -> Option<u32> {
    DEFAULTS.mcts.iteration_limit
}
pub fn time_limit_ms() -> Option<u64> {
    DEFAULTS.mcts.time_limit_ms
}

// Play
pub fn engine_first() -> bool {
    DEFAULTS.play.engine_first
}
pub fn seed() -> Option<u64> {
    DEFAULTS.play.seed
}
