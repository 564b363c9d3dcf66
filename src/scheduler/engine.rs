//! Two-phase scheduling engine.
//!
//! # Algorithm
//!
//! 1. Multi-start week assignment: repeat [`find_schedule`] on fresh copies
//!    of the request graph, keep the trial with the fewest unschedulable
//!    matchups.
//! 2. Remove every committed week from the teams' free weeks.
//! 3. Multi-start balancing: repeat [`set_game_locations`] on that snapshot,
//!    keep the trial with the lowest sum of squared residuals.
//! 4. Merge both error reports.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::location::{set_game_locations, LocationPlan};
use super::search::multi_start;
use super::week::{find_schedule, WeekAssignment};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::models::{
    Availability, ErrorReport, FillerGames, LocationAssignment, RequestGraph, WeekSchedule,
};

/// Combined result of both phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Week of every placed matchup.
    pub schedule: WeekSchedule,
    /// Host side of every placed matchup.
    pub locations: LocationAssignment,
    /// Filler games per team.
    pub filler: FillerGames,
    /// Unschedulable matchups and residual imbalances.
    pub errors: ErrorReport,
    /// Seed of the kept week-assignment trial.
    pub schedule_seed: u64,
    /// Seed of the kept balancing trial.
    pub balance_seed: u64,
    /// Week-assignment trials run.
    pub schedule_trials: usize,
    /// Balancing trials run.
    pub balance_trials: usize,
}

/// Matchup scheduler.
///
/// # Example
///
/// ```
/// use u_matchup::models::{Availability, RequestGraph};
/// use u_matchup::scheduler::MatchupScheduler;
///
/// let requests = RequestGraph::new().with_request("A", "B", None);
/// let availability = Availability::new()
///     .with_team("A", 0, [1, 2, 3, 4])
///     .with_team("B", 0, [1, 2, 3, 4]);
///
/// let outcome = MatchupScheduler::new().schedule(&requests, &availability).unwrap();
/// assert_eq!(outcome.schedule.len(), 1);
/// assert!(outcome.errors.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchupScheduler {
    config: SearchConfig,
}

impl MatchupScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Schedules weeks and locations. Inputs are not modified.
    pub fn schedule(
        &self,
        requests: &RequestGraph,
        availability: &Availability,
    ) -> Result<ScheduleOutcome, EngineError> {
        do_schedule(requests, availability, &self.config)
    }
}

/// Schedules weeks and locations for every requested matchup.
///
/// Each trial works on its own copy of `requests`, so the caller's graph
/// stays intact. Fails only on malformed input (unknown team, zero
/// iteration cap); infeasibility is reported in `errors`.
pub fn do_schedule(
    requests: &RequestGraph,
    availability: &Availability,
    config: &SearchConfig,
) -> Result<ScheduleOutcome, EngineError> {
    config.validate()?;
    for team in requests.all_teams() {
        availability.require(team)?;
    }

    let weeks = multi_start(config.schedule_iterations, config.parallel, |seed| {
        let mut working = requests.clone();
        let assignment = find_schedule(&mut working, availability, seed)?;
        let score = assignment.errors.len() as u64;
        Ok((assignment, score))
    })?;
    info!(
        seed = weeks.seed,
        unschedulable = weeks.score,
        trials = weeks.trials_run,
        "week assignment done"
    );
    let WeekAssignment {
        schedule,
        errors: mut report,
    } = weeks.value;

    let snapshot = availability.after_schedule(&schedule)?;
    let balance = multi_start(config.balance_iterations, config.parallel, |seed| {
        let plan = set_game_locations(&schedule, &snapshot, requests, config, seed)?;
        let score = plan.errors.imbalance_score();
        Ok((plan, score))
    })?;
    info!(
        seed = balance.seed,
        imbalance = balance.score,
        trials = balance.trials_run,
        "location assignment done"
    );
    let LocationPlan {
        locations,
        filler,
        errors,
    } = balance.value;

    report.merge(errors);
    Ok(ScheduleOutcome {
        schedule,
        locations,
        filler,
        errors: report,
        schedule_seed: weeks.seed,
        balance_seed: balance.seed,
        schedule_trials: weeks.trials_run,
        balance_trials: balance.trials_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Matchup;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// A slice of a college season: 24 programs, weeks 0..14.
    fn season_requests() -> RequestGraph {
        RequestGraph::new()
            .with_request("Clemson", "Penn State", None)
            .with_request("Miami", "Alabama", Some(true))
            .with_request("Miami", "Arkansas", Some(true))
            .with_request("Miami", "Appalachian State", Some(true))
            .with_request("Florida State", "Oregon", Some(false))
            .with_request("Florida State", "Penn State", Some(true))
            .with_request("NC State", "Alabama", Some(true))
            .with_request("NC State", "Maryland", Some(true))
            .with_request("NC State", "Baylor", Some(true))
            .with_request("Virginia Tech", "Baylor", Some(true))
            .with_request("Virginia Tech", "Ohio State", Some(false))
            .with_request("Virginia Tech", "Maryland", Some(true))
            .with_request("Virginia Tech", "Missouri", Some(true))
            .with_request("Rutgers", "UCF", Some(true))
            .with_request("Rutgers", "Utah", Some(true))
            .with_request("Penn State", "Texas A&M", Some(true))
            .with_request("Penn State", "Georgia State", Some(false))
            .with_request("Maryland", "LSU", Some(true))
            .with_request("Oregon", "Colorado", Some(true))
            .with_request("Oregon", "UCF", Some(true))
            .with_request("Ohio State", "Baylor", Some(true))
            .with_request("Ohio State", "UCF", Some(true))
            .with_request("Ohio State", "Appalachian State", Some(true))
            .with_request("Colorado", "Texas A&M", Some(true))
            .with_request("Colorado", "Western Michigan", Some(true))
            .with_request("Colorado", "Georgia State", Some(true))
            .with_request("Utah", "Georgia State", Some(true))
            .with_request("Utah", "Western Michigan", Some(true))
            .with_request("Utah", "Texas A&M", Some(true))
            .with_request("Kansas", "Georgia State", Some(true))
            .with_request("Kansas", "Missouri", Some(true))
            .with_request("UCF", "USF", None)
            .with_request("Baylor", "Texas A&M", Some(true))
            .with_request("Western Michigan", "Appalachian State", Some(true))
    }

    fn season_availability() -> Availability {
        Availability::new()
            .with_team("Clemson", 0, [0, 1, 2, 3, 11, 12, 13])
            .with_team("Miami", -2, [0, 1, 2, 3, 4, 5, 8])
            .with_team("Florida State", -2, [0, 1, 2, 3, 4, 7, 13])
            .with_team("NC State", -2, [0, 1, 2, 3, 5, 6, 9])
            .with_team("Virginia Tech", 0, [0, 1, 2, 3, 4, 5, 7])
            .with_team("Rutgers", 4, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Penn State", 2, [0, 1, 2, 3, 4, 5, 10])
            .with_team("Maryland", 0, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Oregon", -2, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Ohio State", 2, [0, 1, 2, 3, 4, 5, 7])
            .with_team("Colorado", -2, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Utah", 2, [0, 1, 2, 3, 5, 7, 8])
            .with_team("Kansas", -2, [0, 1, 2, 3, 4, 5, 6])
            .with_team("UCF", -2, [0, 1, 2, 3, 4, 5, 10])
            .with_team("Baylor", 0, [0, 1, 2, 3, 4, 12, 13])
            .with_team("Texas A&M", -4, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Arkansas", 0, [0, 1, 2, 3, 4, 8, 10, 12])
            .with_team("Alabama", -2, [0, 1, 2, 3, 4, 5, 13])
            .with_team("Missouri", 0, [0, 1, 2, 3, 4, 5, 6])
            .with_team("LSU", -2, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Georgia State", 0, [0, 1, 2, 3, 4, 5, 6])
            .with_team("Appalachian State", 4, [0, 1, 2, 3, 4, 6, 7])
            .with_team("Western Michigan", -4, [0, 1, 2, 3, 4, 5, 10])
            .with_team("USF", -2, [0, 1, 2, 4, 5, 6, 7])
    }

    fn assert_outcome_invariants(
        outcome: &ScheduleOutcome,
        requests: &RequestGraph,
        availability: &Availability,
    ) {
        // Free-week respect and no double booking
        for (team, games) in outcome.schedule.iter() {
            let free = &availability.get(team).unwrap().free_weeks;
            let weeks: BTreeSet<_> = games.values().copied().collect();
            assert_eq!(weeks.len(), games.len(), "{team} double-booked");
            assert!(weeks.is_subset(free), "{team} booked outside free weeks");
            for (opp, week) in games {
                assert_eq!(outcome.schedule.week(opp, team), Some(*week));
            }
        }
        // Every request placed or reported
        for matchup in requests.matchups() {
            let [a, b] = matchup.teams();
            let placed = outcome.schedule.week(a, b).is_some();
            assert!(placed ^ outcome.errors.is_unschedulable(&matchup), "{matchup}");
            if placed {
                let home = outcome.locations.is_home(a, b).unwrap();
                assert_eq!(outcome.locations.is_home(b, a), Some(!home));
            }
        }
        // Balance convergence
        for (team, record) in availability.iter() {
            let real = outcome.locations.home_count(team) as i32
                - outcome.locations.away_count(team) as i32;
            let filler = outcome.filler.get(team).net_home();
            assert_eq!(
                record.balance - real - filler,
                outcome.errors.residual(team),
                "{team}"
            );
        }
    }

    #[test]
    fn test_two_teams() {
        let requests = RequestGraph::new().with_request("A", "B", None);
        let availability = Availability::new()
            .with_team("A", 0, [1, 2, 3])
            .with_team("B", 0, [1, 2, 3]);
        let outcome = do_schedule(&requests, &availability, &SearchConfig::default()).unwrap();

        let week = outcome.schedule.week("A", "B").unwrap();
        assert!([1, 2, 3].contains(&week));
        assert_eq!(outcome.schedule.week("B", "A"), Some(week));
        assert_eq!(outcome.schedule_trials, 1);
        assert_outcome_invariants(&outcome, &requests, &availability);
    }

    #[test]
    fn test_unschedulable_pair_reported() {
        let requests = RequestGraph::new().with_request("A", "B", None);
        let availability = Availability::new()
            .with_team("A", 0, [1, 2])
            .with_team("B", 0, [3, 4]);
        let config = SearchConfig::default().with_iterations(5);
        let outcome = do_schedule(&requests, &availability, &config).unwrap();

        assert!(outcome.schedule.is_empty());
        assert!(outcome.errors.is_unschedulable(&Matchup::new("A", "B")));
        // Zero intersection fails in every trial
        assert_eq!(outcome.schedule_trials, 5);
    }

    #[test]
    fn test_unknown_team_rejected() {
        let requests = RequestGraph::new().with_request("A", "Ghost", None);
        let availability = Availability::new().with_team("A", 0, [1]);
        let err = do_schedule(&requests, &availability, &SearchConfig::default()).unwrap_err();
        assert_eq!(err, EngineError::UnknownTeam { team: "Ghost".into() });
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = do_schedule(
            &RequestGraph::new(),
            &Availability::new(),
            &SearchConfig::default().with_iterations(0),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_inputs_not_consumed() {
        let requests = season_requests();
        let availability = season_availability();
        let before = (requests.clone(), availability.clone());
        let _ = do_schedule(&requests, &availability, &SearchConfig::default()).unwrap();
        assert_eq!((requests, availability), before);
    }

    #[test]
    fn test_season_invariants() {
        let requests = season_requests();
        let availability = season_availability();
        let config = SearchConfig::default().with_iterations(50);
        let outcome = do_schedule(&requests, &availability, &config).unwrap();

        assert_outcome_invariants(&outcome, &requests, &availability);
        assert_eq!(outcome.filler.len(), availability.len());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let requests = season_requests();
        let availability = season_availability();
        let config = SearchConfig::default().with_iterations(20);
        let seq = do_schedule(&requests, &availability, &config).unwrap();
        let par = do_schedule(&requests, &availability, &config.with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_deterministic() {
        let requests = season_requests();
        let availability = season_availability();
        let config = SearchConfig::default().with_iterations(10);
        let a = do_schedule(&requests, &availability, &config).unwrap();
        let b = do_schedule(&requests, &availability, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scheduler_wrapper() {
        let requests = RequestGraph::new().with_request("A", "B", Some(true));
        let availability = Availability::new()
            .with_team("A", 0, [1, 2, 3])
            .with_team("B", 0, [1, 2, 3]);
        let scheduler = MatchupScheduler::new()
            .with_config(SearchConfig::default().with_iterations(3).with_bye_weeks(1));
        assert_eq!(scheduler.config().bye_weeks, 1);

        let outcome = scheduler.schedule(&requests, &availability).unwrap();
        assert_eq!(outcome.locations.is_home("A", "B"), Some(true));
        assert_outcome_invariants(&outcome, &requests, &availability);
    }

    fn arb_instance() -> impl Strategy<Value = (RequestGraph, Availability)> {
        let teams = 2..7usize;
        teams.prop_flat_map(|n| {
            let weeks = prop::collection::vec(prop::collection::btree_set(0u32..10, 0..8), n);
            let balances = prop::collection::vec(-3i32..=3, n);
            let pairs = prop::collection::vec((0..n, 0..n, prop::option::of(any::<bool>())), 0..12);
            (weeks, balances, pairs).prop_map(move |(weeks, balances, pairs)| {
                let names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
                let mut availability = Availability::new();
                for i in 0..n {
                    availability = availability.with_team(
                        names[i].clone(),
                        balances[i],
                        weeks[i].iter().copied(),
                    );
                }
                let mut requests = RequestGraph::new();
                for (a, b, pref) in pairs {
                    if a != b && !requests.contains(&names[a], &names[b]) {
                        requests = requests.with_request(names[a].clone(), names[b].clone(), pref);
                    }
                }
                (requests, availability)
            })
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_outcome_invariants((requests, availability) in arb_instance()) {
            let config = SearchConfig::default().with_iterations(4);
            let outcome = do_schedule(&requests, &availability, &config).unwrap();
            assert_outcome_invariants(&outcome, &requests, &availability);
        }
    }
}
