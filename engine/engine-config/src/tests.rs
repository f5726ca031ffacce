//! Tests for the configuration module.

use super::*;
use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::Mutex;

/// Environment variables are process-wide; tests touching them take this lock.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ENV_KEYS: &[&str] = &[
    CONFIG_PATH_ENV,
    "UCT_COMMON_LOG_LEVEL",
    "UCT_MCTS_EXPLORATION_CONSTANT",
    "UCT_MCTS_ITERATION_LIMIT",
    "UCT_MCTS_TIME_LIMIT_MS",
    "UCT_PLAY_ENGINE_FIRST",
    "UCT_PLAY_SEED",
];

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert!((config.mcts.exploration_constant - 2.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.iteration_limit, Some(1000));
    assert_eq!(config.mcts.time_limit_ms, None);
    assert!(!config.play.engine_first);
    assert_eq!(config.play.seed, None);
}

#[test]
fn test_accessors_match_embedded_defaults() {
    assert_eq!(log_level(), "info");
    assert_eq!(iteration_limit(), Some(1000));
    assert_eq!(time_limit_ms(), None);
    assert!(!engine_first());
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[mcts]
exploration_constant = 0.7
time_limit_ms = 250

[play]
engine_first = true
seed = 42
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert!((config.mcts.exploration_constant - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.mcts.iteration_limit, None);
    assert_eq!(config.mcts.time_limit_ms, Some(250));
    assert!(config.play.engine_first);
    assert_eq!(config.play.seed, Some(42));
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[play]
engine_first = true
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert!(config.play.engine_first);
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.mcts.iteration_limit, Some(1000)); // Default
}

#[test]
fn test_limits_fall_back_to_default_iterations() {
    let config: CentralConfig = toml::from_str("[mcts]\nexploration_constant = 1.0\n").unwrap();
    assert_eq!(config.mcts.iteration_limit, None);
    assert_eq!(config.mcts.limits(), (Some(1000), None));
}

#[test]
fn test_limits_keep_explicit_values() {
    let time_only: CentralConfig = toml::from_str("[mcts]\ntime_limit_ms = 50\n").unwrap();
    assert_eq!(time_only.mcts.limits(), (None, Some(50)));

    let both: CentralConfig =
        toml::from_str("[mcts]\niteration_limit = 10\ntime_limit_ms = 50\n").unwrap();
    assert_eq!(both.mcts.limits(), (Some(10), Some(50)));
}

#[test]
fn test_uct_env_overrides() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_COMMON_LOG_LEVEL", "trace");
    std::env::set_var("UCT_MCTS_EXPLORATION_CONSTANT", "0.5");
    std::env::set_var("UCT_PLAY_ENGINE_FIRST", "true");
    std::env::set_var("UCT_PLAY_SEED", "7");

    let config = load_config();
    assert_eq!(config.common.log_level, "trace");
    assert!((config.mcts.exploration_constant - 0.5).abs() < f64::EPSILON);
    assert!(config.play.engine_first);
    assert_eq!(config.play.seed, Some(7));

    clear_env();
}

#[test]
fn test_env_time_limit_replaces_iterations() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_MCTS_TIME_LIMIT_MS", "300");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.time_limit_ms, Some(300));
    assert_eq!(config.mcts.iteration_limit, None);

    clear_env();
}

#[test]
fn test_env_iterations_replace_time_limit() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_MCTS_ITERATION_LIMIT", "64");

    let file = write_config("[mcts]\ntime_limit_ms = 100\n");
    let config = load_from_path(file.path());
    assert_eq!(config.mcts.iteration_limit, Some(64));
    assert_eq!(config.mcts.time_limit_ms, None);

    clear_env();
}

#[test]
fn test_env_both_limits_are_kept() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_MCTS_ITERATION_LIMIT", "64");
    std::env::set_var("UCT_MCTS_TIME_LIMIT_MS", "100");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.limits(), (Some(64), Some(100)));

    clear_env();
}

#[test]
fn test_env_both_limits_kept_when_one_repeats_configured_value() {
    let _guard = env_lock();
    clear_env();
    // Same value as the built-in default iteration limit
    std::env::set_var("UCT_MCTS_ITERATION_LIMIT", "1000");
    std::env::set_var("UCT_MCTS_TIME_LIMIT_MS", "100");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.limits(), (Some(1000), Some(100)));

    clear_env();
}

#[test]
fn test_env_limit_repeating_file_value_still_replaces_other() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_MCTS_TIME_LIMIT_MS", "100");

    let file = write_config("[mcts]\ntime_limit_ms = 100\niteration_limit = 10\n");
    let config = load_from_path(file.path());
    assert_eq!(config.mcts.limits(), (None, Some(100)));

    clear_env();
}

#[test]
fn test_unparseable_limit_does_not_replace_other() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_MCTS_ITERATION_LIMIT", "lots");
    std::env::set_var("UCT_MCTS_TIME_LIMIT_MS", "100");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.limits(), (None, Some(100)));

    clear_env();
}

#[test]
fn test_unparseable_env_is_ignored() {
    let _guard = env_lock();
    clear_env();
    std::env::set_var("UCT_MCTS_ITERATION_LIMIT", "lots");
    std::env::set_var("UCT_PLAY_ENGINE_FIRST", "maybe");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.iteration_limit, Some(1000));
    assert!(!config.play.engine_first);

    clear_env();
}

#[test]
fn test_load_from_path() {
    let _guard = env_lock();
    clear_env();

    let file = write_config("[mcts]\niteration_limit = 5000\n\n[play]\nseed = 3\n");
    let config = load_from_path(file.path());
    assert_eq!(config.mcts.iteration_limit, Some(5000));
    assert_eq!(config.play.seed, Some(3));
}

#[test]
fn test_invalid_toml_falls_back_to_defaults() {
    let _guard = env_lock();
    clear_env();

    let file = write_config("[mcts\niteration_limit = ");
    let config = load_from_path(file.path());
    assert_eq!(config.mcts.iteration_limit, Some(1000));
    assert_eq!(config.common.log_level, "info");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _guard = env_lock();
    clear_env();

    let dir = tempfile::tempdir().unwrap();
    let config = load_from_path(&dir.path().join("absent.toml"));
    assert_eq!(config.mcts.iteration_limit, Some(1000));
}

#[test]
fn test_config_path_env() {
    let _guard = env_lock();
    clear_env();

    let file = write_config("[common]\nlog_level = \"warn\"\n");
    std::env::set_var(CONFIG_PATH_ENV, file.path());

    let config = load_config();
    assert_eq!(config.common.log_level, "warn");

    clear_env();
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.log_level, cloned.common.log_level);
    assert_eq!(config.mcts.limits(), cloned.mcts.limits());
}
