//! Greedy week assigner.
//!
//! # Algorithm
//!
//! 1. Register every distinct matchup with its common free weeks.
//! 2. Queue matchups by `|common weeks| - max(outstanding requests)`,
//!    ascending, with a seeded random tie-breaker.
//! 3. Pop the most constrained matchup. Among its common weeks pick, at
//!    random, one of those shared with the fewest other pending matchups of
//!    either team. No common week left: report it unschedulable.
//! 4. Commit the week and consume it from every pending matchup of both
//!    teams; those that lost it are re-prioritized.
//!
//! # Complexity
//! O(m · (d · w + log m)) where m=matchups, d=max requests/team, w=weeks.
//!
//! # Reference
//! Brélaz (1979), "New methods to color the vertices of a graph", CACM 22(4)

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::queue::LazyQueue;
use super::registry::MatchupRegistry;
use crate::error::EngineError;
use crate::models::{
    Availability, ErrorReport, Matchup, RequestGraph, WeekSchedule, NO_OVERLAPPING_WEEKS,
};

/// Result of one week-assignment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekAssignment {
    /// Committed weeks.
    pub schedule: WeekSchedule,
    /// Matchups that could not be placed.
    pub errors: ErrorReport,
}

/// Assigns a week to every requested matchup.
///
/// `requests` is consumed: every matchup, placed or not, is removed from it.
/// `availability` is read only. Identical inputs and seed give identical
/// output.
pub fn find_schedule(
    requests: &mut RequestGraph,
    availability: &Availability,
    seed: u64,
) -> Result<WeekAssignment, EngineError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut registry = MatchupRegistry::build(requests, availability)?;

    let mut queue: LazyQueue<Matchup, (i64, u64)> = LazyQueue::new();
    for matchup in registry.matchups() {
        let priority = registry.priority(matchup, requests);
        queue.push(matchup.clone(), (priority, rng.random()));
    }

    let mut result = WeekAssignment::default();
    while let Some((matchup, _)) = queue.pop() {
        let candidates = registry.least_contended(&matchup, requests);
        let Some(&week) = candidates.choose(&mut rng) else {
            trace!(%matchup, "no overlapping free weeks");
            requests.remove_matchup(&matchup);
            result
                .errors
                .push_unschedulable(matchup, NO_OVERLAPPING_WEEKS);
            continue;
        };

        trace!(%matchup, week, "committed");
        result.schedule.commit(&matchup, week);
        requests.remove_matchup(&matchup);

        for team in matchup.teams() {
            let neighbours: Vec<Matchup> = requests
                .opponents(team)
                .map(|opponent| Matchup::new(team, opponent))
                .collect();
            for other in neighbours {
                if registry.consume_week(&other, week) && queue.contains(&other) {
                    let priority = registry.priority(&other, requests);
                    queue.push(other, (priority, rng.random()));
                }
            }
        }
    }

    Ok(result)
}
