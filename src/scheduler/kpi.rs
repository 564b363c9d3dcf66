//! Outcome quality metrics (KPIs).
//!
//! Summarizes a [`ScheduleOutcome`] for reporting.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled matchups | Matchups with a committed week |
//! | Unschedulable matchups | Matchups reported with no common week |
//! | Satisfaction rate | scheduled / (scheduled + unschedulable) |
//! | Imbalance score | Sum of squared residual balances |
//! | Unbalanced teams | Teams with a non-zero residual |
//! | Filler totals | Home, away and flexible filler games across teams |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use super::ScheduleOutcome;

/// Outcome performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeKpi {
    /// Matchups with a committed week.
    pub scheduled_matchups: usize,
    /// Matchups that found no common week.
    pub unschedulable_matchups: usize,
    /// Fraction of requested matchups that were placed (1.0 if none requested).
    pub satisfaction_rate: f64,
    /// Sum of squared residual balances.
    pub imbalance_score: u64,
    /// Teams left with residual imbalance.
    pub unbalanced_teams: usize,
    /// Filler games at home, all teams.
    pub filler_home: u32,
    /// Filler games away, all teams.
    pub filler_away: u32,
    /// Flexible filler slots, all teams.
    pub filler_flexible: u32,
}

impl OutcomeKpi {
    /// Computes KPIs from a finished outcome.
    pub fn calculate(outcome: &ScheduleOutcome) -> Self {
        let scheduled = outcome.schedule.len();
        let unschedulable = outcome.errors.unschedulable().count();
        let requested = scheduled + unschedulable;
        let satisfaction_rate = if requested == 0 {
            1.0
        } else {
            scheduled as f64 / requested as f64
        };

        let (mut filler_home, mut filler_away, mut filler_flexible) = (0, 0, 0);
        for (_, count) in outcome.filler.iter() {
            filler_home += count.home;
            filler_away += count.away;
            filler_flexible += count.flexible;
        }

        Self {
            scheduled_matchups: scheduled,
            unschedulable_matchups: unschedulable,
            satisfaction_rate,
            imbalance_score: outcome.errors.imbalance_score(),
            unbalanced_teams: outcome.errors.imbalances().count(),
            filler_home,
            filler_away,
            filler_flexible,
        }
    }
}
