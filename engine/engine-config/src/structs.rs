//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_engine_first() -> bool {
    defaults::engine_first()
}

/// Root configuration, one field per `[section]` of config.toml.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CentralConfig {
    pub common: CommonConfig,
    pub mcts: MctsConfig,
    pub play: PlayConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// UCT search settings
///
/// `iteration_limit` and `time_limit_ms` are mutually exclusive. A section
/// that names neither falls back to the default iteration limit, see
/// [`MctsConfig::limits`].
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    #[serde(default)]
    pub iteration_limit: Option<u32>,
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: defaults::exploration_constant(),
            iteration_limit: defaults::iteration_limit(),
            time_limit_ms: defaults::time_limit_ms(),
        }
    }
}

impl MctsConfig {
    /// The configured `(iteration_limit, time_limit_ms)` pair.
    ///
    /// Both are returned as given when at least one is set, so a config that
    /// sets both is still reported as such. When neither is set the built-in
    /// defaults apply.
    pub fn limits(&self) -> (Option<u32>, Option<u64>) {
        match (self.iteration_limit, self.time_limit_ms) {
            (None, None) => (defaults::iteration_limit(), defaults::time_limit_ms()),
            limits => limits,
        }
    }
}

/// Interactive game settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayConfig {
    /// Let the engine open the game as X
    #[serde(default = "d_engine_first")]
    pub engine_first: bool,
    /// Fixed RNG seed for reproducible engine play
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            engine_first: defaults::engine_first(),
            seed: defaults::seed(),
        }
    }
}
