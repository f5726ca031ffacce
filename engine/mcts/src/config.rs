//! MCTS configuration parameters.

use std::time::Duration;

use thiserror::Error;

use crate::budget::SearchBudget;

/// Exploration constant used when none is given: sqrt(2), the UCB1 value
/// for rewards in [0, 1].
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Errors raised while building a search configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Both an iteration limit and a time limit were given; choose exactly one")]
    BothLimits,

    #[error("Neither an iteration limit nor a time limit was given")]
    NoLimit,

    #[error("Iteration limit must be at least 1")]
    ZeroIterations,

    #[error("Time limit must be greater than zero")]
    ZeroTimeLimit,

    #[error("Exploration constant must be finite and non-negative, got {0}")]
    InvalidExplorationConstant(f64),
}

/// Configuration for Monte Carlo Tree Search.
///
/// Always valid once constructed: exactly one budget is set and the
/// exploration constant is a finite, non-negative number.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Exploration constant for the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// Zero selects purely by mean score.
    exploration_constant: f64,

    /// Iteration or time budget for each search.
    budget: SearchBudget,
}

impl MctsConfig {
    /// Build a config from an exploration constant and exactly one of the two
    /// limits.
    pub fn new(
        exploration_constant: f64,
        iteration_limit: Option<u32>,
        time_limit: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        validate_exploration_constant(exploration_constant)?;

        let budget = match (iteration_limit, time_limit) {
            (Some(_), Some(_)) => return Err(ConfigError::BothLimits),
            (None, None) => return Err(ConfigError::NoLimit),
            (Some(0), None) => return Err(ConfigError::ZeroIterations),
            (Some(n), None) => SearchBudget::Iterations(n),
            (None, Some(limit)) if limit.is_zero() => return Err(ConfigError::ZeroTimeLimit),
            (None, Some(limit)) => SearchBudget::Time(limit),
        };

        Ok(Self {
            exploration_constant,
            budget,
        })
    }

    /// Iteration-limited config with the default exploration constant.
    pub fn with_iteration_limit(iterations: u32) -> Result<Self, ConfigError> {
        Self::new(DEFAULT_EXPLORATION_CONSTANT, Some(iterations), None)
    }

    /// Time-limited config with the default exploration constant.
    pub fn with_time_limit(limit: Duration) -> Result<Self, ConfigError> {
        Self::new(DEFAULT_EXPLORATION_CONSTANT, None, Some(limit))
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            exploration_constant: 2.0,
            budget: SearchBudget::Iterations(200),
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Result<Self, ConfigError> {
        validate_exploration_constant(c)?;
        self.exploration_constant = c;
        Ok(self)
    }

    #[inline]
    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
    }

    #[inline]
    pub fn budget(&self) -> SearchBudget {
        self.budget
    }

    /// The iteration limit, if this is an iteration-limited config.
    pub fn iteration_limit(&self) -> Option<u32> {
        match self.budget {
            SearchBudget::Iterations(n) => Some(n),
            SearchBudget::Time(_) => None,
        }
    }

    /// The time limit, if this is a time-limited config.
    pub fn time_limit(&self) -> Option<Duration> {
        match self.budget {
            SearchBudget::Time(limit) => Some(limit),
            SearchBudget::Iterations(_) => None,
        }
    }
}

fn validate_exploration_constant(c: f64) -> Result<(), ConfigError> {
    if c.is_finite() && c >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidExplorationConstant(c))
    }
}
