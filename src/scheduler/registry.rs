//! Matchup registry: common free weeks per pending matchup.
//!
//! Built once per week-assignment pass from the request graph and team
//! availability. As weeks are committed, they are consumed from the
//! neighbouring matchups' common sets.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::EngineError;
use crate::models::{Availability, Matchup, RequestGraph, Week};

/// Common free weeks of every requested matchup.
#[derive(Debug, Clone, Default)]
pub struct MatchupRegistry {
    common_weeks: BTreeMap<Matchup, BTreeSet<Week>>,
}

impl MatchupRegistry {
    /// Derives distinct matchups and their common free weeks.
    ///
    /// Fails with `UnknownTeam` if either side has no availability record.
    pub fn build(requests: &RequestGraph, availability: &Availability) -> Result<Self, EngineError> {
        let mut common_weeks = BTreeMap::new();
        for matchup in requests.matchups() {
            let weeks = availability.common_free_weeks(matchup.first(), matchup.second())?;
            common_weeks.insert(matchup, weeks);
        }
        Ok(Self { common_weeks })
    }

    /// Registered matchups, in canonical order.
    pub fn matchups(&self) -> impl Iterator<Item = &Matchup> {
        self.common_weeks.keys()
    }

    /// Common free weeks still open for `matchup`.
    pub fn common_weeks(&self, matchup: &Matchup) -> Option<&BTreeSet<Week>> {
        self.common_weeks.get(matchup)
    }

    /// Number of registered matchups.
    pub fn len(&self) -> usize {
        self.common_weeks.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.common_weeks.is_empty()
    }

    /// Scheduling priority of `matchup` (lower = more constrained).
    ///
    /// `|common weeks| - max(outstanding requests of either side)`.
    pub fn priority(&self, matchup: &Matchup, requests: &RequestGraph) -> i64 {
        let open = self.common_weeks.get(matchup).map_or(0, BTreeSet::len);
        let busiest = requests
            .outstanding(matchup.first())
            .max(requests.outstanding(matchup.second()));
        open as i64 - busiest as i64
    }

    /// For each common week of `matchup`, how many other pending matchups
    /// of either team also have that week open.
    pub fn contention(&self, matchup: &Matchup, requests: &RequestGraph) -> BTreeMap<Week, usize> {
        let Some(weeks) = self.common_weeks.get(matchup) else {
            return BTreeMap::new();
        };
        let mut counts: BTreeMap<Week, usize> = weeks.iter().map(|&w| (w, 0)).collect();

        for team in matchup.teams() {
            for opponent in requests.opponents(team) {
                let other = Matchup::new(team, opponent);
                if other == *matchup {
                    continue;
                }
                if let Some(other_weeks) = self.common_weeks.get(&other) {
                    for week in weeks.intersection(other_weeks) {
                        if let Some(count) = counts.get_mut(week) {
                            *count += 1;
                        }
                    }
                }
            }
        }
        counts
    }

    /// Common weeks of `matchup` with the lowest contention, ascending.
    pub fn least_contended(&self, matchup: &Matchup, requests: &RequestGraph) -> Vec<Week> {
        let counts = self.contention(matchup, requests);
        let Some(&min) = counts.values().min() else {
            return Vec::new();
        };
        counts
            .into_iter()
            .filter(|&(_, count)| count == min)
            .map(|(week, _)| week)
            .collect()
    }

    /// Removes `week` from `matchup`'s common set. Returns whether it was there.
    pub fn consume_week(&mut self, matchup: &Matchup, week: Week) -> bool {
        self.common_weeks
            .get_mut(matchup)
            .is_some_and(|weeks| weeks.remove(&week))
    }
}
