//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "UCT_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by UCT_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_ENV,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
    // Optional parseable field (Option<u32>, Option<u64>, etc.)
    // Evaluates to whether the variable was present and applied.
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => {
                $config.$section.$field = Some(v);
                true
            }
            Ok(Err(_)) => {
                warn!("Ignoring unparseable {}", $key);
                false
            }
            Err(_) => false,
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: UCT_<SECTION>_<KEY>
///
/// Setting only one of the two search limits replaces whichever limit the
/// file configured; setting both keeps both so validation can reject them.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "UCT_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(
        config,
        mcts.exploration_constant,
        "UCT_MCTS_EXPLORATION_CONSTANT",
        parse
    );

    let iterations_set = env_override!(
        config,
        mcts.iteration_limit,
        "UCT_MCTS_ITERATION_LIMIT",
        optional_parse
    );
    let time_set = env_override!(
        config,
        mcts.time_limit_ms,
        "UCT_MCTS_TIME_LIMIT_MS",
        optional_parse
    );
    if iterations_set && !time_set {
        config.mcts.time_limit_ms = None;
    } else if time_set && !iterations_set {
        config.mcts.iteration_limit = None;
    }

    // Play
    env_override!(config, play.engine_first, "UCT_PLAY_ENGINE_FIRST", parse);
    let _ = env_override!(config, play.seed, "UCT_PLAY_SEED", optional_parse);

    config
}
