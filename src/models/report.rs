//! Error report.
//!
//! Collects the two non-fatal failure kinds of a run: matchups that found
//! no common week, and teams whose home/away balance could not be brought
//! to zero. Entries are tagged so consumers never inspect key shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Matchup;

/// Reason recorded when a matchup runs out of common weeks.
pub const NO_OVERLAPPING_WEEKS: &str = "No overlapping free weeks";

/// A single report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportEntry {
    /// No common free week survived for this matchup.
    Unschedulable { matchup: Matchup, reason: String },
    /// Residual balance left after all moves (same sign convention as
    /// [`super::TeamAvailability::balance`]).
    Imbalance { team: String, residual: i32 },
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unschedulable { matchup, reason } => write!(f, "{matchup}: {reason}"),
            Self::Imbalance { team, residual } if *residual > 0 => {
                write!(f, "{team}: needs {residual} more home game(s)")
            }
            Self::Imbalance { team, residual } => {
                write!(f, "{team}: needs {} more away game(s)", residual.unsigned_abs())
            }
        }
    }
}

/// Non-fatal problems found during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Entries in the order they were recorded.
    pub entries: Vec<ReportEntry>,
}

impl ErrorReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an unschedulable matchup.
    pub fn push_unschedulable(&mut self, matchup: Matchup, reason: impl Into<String>) {
        self.entries.push(ReportEntry::Unschedulable {
            matchup,
            reason: reason.into(),
        });
    }

    /// Records a residual imbalance. Zero residuals are ignored.
    pub fn push_imbalance(&mut self, team: impl Into<String>, residual: i32) {
        if residual != 0 {
            self.entries.push(ReportEntry::Imbalance {
                team: team.into(),
                residual,
            });
        }
    }

    /// Appends every entry of `other`.
    pub fn merge(&mut self, other: ErrorReport) {
        self.entries.extend(other.entries);
    }

    /// Unschedulable matchups.
    pub fn unschedulable(&self) -> impl Iterator<Item = &Matchup> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Unschedulable { matchup, .. } => Some(matchup),
            ReportEntry::Imbalance { .. } => None,
        })
    }

    /// `(team, residual)` pairs.
    pub fn imbalances(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Imbalance { team, residual } => Some((team.as_str(), *residual)),
            ReportEntry::Unschedulable { .. } => None,
        })
    }

    /// Whether `matchup` was reported unschedulable.
    pub fn is_unschedulable(&self, matchup: &Matchup) -> bool {
        self.unschedulable().any(|m| m == matchup)
    }

    /// Residual balance reported for `team` (0 if none).
    pub fn residual(&self, team: &str) -> i32 {
        self.imbalances()
            .filter(|(t, _)| *t == team)
            .map(|(_, r)| r)
            .sum()
    }

    /// Sum of squared residuals.
    pub fn imbalance_score(&self) -> u64 {
        self.imbalances()
            .map(|(_, r)| u64::from(r.unsigned_abs()).pow(2))
            .sum()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the run was clean.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
