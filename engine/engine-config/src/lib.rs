//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic for the
//! engine and the `play` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command line flags (applied by the binary)
//! 2. Environment variables (`UCT_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! UCT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     UCT_COMMON_LOG_LEVEL=debug
//!     UCT_MCTS_EXPLORATION_CONSTANT=1.0
//!     UCT_MCTS_ITERATION_LIMIT=5000
//!     UCT_MCTS_TIME_LIMIT_MS=250
//!     UCT_PLAY_ENGINE_FIRST=true
//!     UCT_PLAY_SEED=42
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
