//! Search budgets: a fixed number of iterations or a wall-clock limit.

use std::time::{Duration, Instant};

/// How much work a single search may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Run exactly this many iterations.
    Iterations(u32),
    /// Keep iterating until this much time has elapsed. The deadline is
    /// polled between iterations, so the last one may overrun it slightly.
    Time(Duration),
}

/// Tracks progress of one search against its budget.
#[derive(Debug)]
pub(crate) struct BudgetTracker {
    budget: SearchBudget,
    started: Instant,
    iterations: u32,
}

impl BudgetTracker {
    pub(crate) fn start(budget: SearchBudget) -> Self {
        Self {
            budget,
            started: Instant::now(),
            iterations: 0,
        }
    }

    /// Whether the search should stop before the next iteration.
    ///
    /// A time budget always allows the first iteration.
    pub(crate) fn exhausted(&self) -> bool {
        match self.budget {
            SearchBudget::Iterations(limit) => self.iterations >= limit,
            SearchBudget::Time(limit) => self.iterations > 0 && self.started.elapsed() >= limit,
        }
    }

    #[inline]
    pub(crate) fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn iterations(&self) -> u32 {
        self.iterations
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
