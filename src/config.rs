//! Search configuration.
//!
//! Controls the multi-start search: how many seeded trials each phase may
//! run, whether preferences steer location choices, how many bye weeks each
//! team keeps, and how a leftover half game is scored.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How a single undetermined filler slot is scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfGamePolicy {
    /// The slot is half home, half away and adds no imbalance.
    #[default]
    Neutral,
    /// The slot adds one unit of residual imbalance, in the direction the
    /// team was last short.
    CountAsImbalance,
}

/// Multi-start search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Trial cap for the week assignment phase.
    pub schedule_iterations: usize,
    /// Trial cap for the home/away balancing phase.
    pub balance_iterations: usize,
    /// Whether stated home/away preferences steer location choices.
    pub respect_preferences: bool,
    /// Free weeks every team keeps open (never used for filler games).
    pub bye_weeks: usize,
    /// Scoring of a leftover half game.
    pub half_game_policy: HalfGamePolicy,
    /// Run trials in parallel batches.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            schedule_iterations: 100,
            balance_iterations: 100,
            respect_preferences: true,
            bye_weeks: 2,
            half_game_policy: HalfGamePolicy::Neutral,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the same trial cap for both phases.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.schedule_iterations = iterations;
        self.balance_iterations = iterations;
        self
    }

    /// Sets the week assignment trial cap.
    pub fn with_schedule_iterations(mut self, iterations: usize) -> Self {
        self.schedule_iterations = iterations;
        self
    }

    /// Sets the balancing trial cap.
    pub fn with_balance_iterations(mut self, iterations: usize) -> Self {
        self.balance_iterations = iterations;
        self
    }

    /// Sets whether preferences are respected.
    pub fn with_respect_preferences(mut self, respect: bool) -> Self {
        self.respect_preferences = respect;
        self
    }

    /// Sets the reserved bye week count.
    pub fn with_bye_weeks(mut self, bye_weeks: usize) -> Self {
        self.bye_weeks = bye_weeks;
        self
    }

    /// Sets the half game policy.
    pub fn with_half_game_policy(mut self, policy: HalfGamePolicy) -> Self {
        self.half_game_policy = policy;
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rejects zero trial caps.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.schedule_iterations == 0 {
            return Err(EngineError::InvalidConfig(
                "schedule_iterations must be positive".into(),
            ));
        }
        if self.balance_iterations == 0 {
            return Err(EngineError::InvalidConfig(
                "balance_iterations must be positive".into(),
            ));
        }
        Ok(())
    }
}
