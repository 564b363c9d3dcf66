//! Fatal engine errors.
//!
//! Infeasible matchups and residual imbalance are not errors; they are
//! reported as data in [`crate::models::ErrorReport`]. `EngineError` covers
//! malformed input only.

use thiserror::Error;

use crate::models::Week;

/// Errors that stop a scheduling run before it starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A team is referenced but has no availability record.
    #[error("Unknown team: {team} has no availability record")]
    UnknownTeam { team: String },

    /// A booked week is outside the season or listed twice.
    #[error("Invalid or duplicate week {week} for {team}")]
    InvalidWeek { team: String, week: Week },

    /// More home games reported than games booked.
    #[error("{team} reports {home_games} home games but only {booked} booked weeks")]
    InvalidHomeCount {
        team: String,
        home_games: usize,
        booked: usize,
    },

    /// Search configuration rejected by [`crate::config::SearchConfig::validate`].
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) fn unknown_team(team: impl Into<String>) -> Self {
        Self::UnknownTeam { team: team.into() }
    }
}
