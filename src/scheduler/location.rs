//! Greedy home/away location assigner.
//!
//! Decides who hosts each committed game and how many filler games every
//! team needs, driving each team's balance toward zero.
//!
//! # Algorithm
//!
//! 1. Each team keeps `bye_weeks` free weeks open; the rest are filler slots.
//! 2. Unbalanced teams are queued by `-(|balance| + undecided games)`.
//! 3. A popped team first spends filler slots on its balance, then hands
//!    out real games from a ranked opponent list (preference alignment,
//!    then closeness of the opponent's need to the mirror of its own) until
//!    balanced or out of games. Every decided game shifts the opponent's
//!    balance, and the opponent is re-queued.
//! 4. Balanced teams with undecided games sit in a lower tier, processed
//!    after every unbalanced team. Each pop decides one game and sends both
//!    sides back through step 3.
//! 5. Leftover filler slots split evenly; an odd slot becomes a flexible
//!    half-home/half-away game.
//! 6. Non-zero balances are reported.
//!
//! Every step removes a filler slot or an undecided game, so the pass
//! terminates.
//!
//! # Reference
//! Miyashiro & Matsui (2005), "A polynomial-time algorithm to find an
//! equitable home-away assignment", Operations Research Letters 33(3)

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::queue::LazyQueue;
use crate::config::{HalfGamePolicy, SearchConfig};
use crate::error::EngineError;
use crate::models::{
    Availability, ErrorReport, FillerCount, FillerGames, LocationAssignment, RequestGraph,
    WeekSchedule,
};

/// Result of one balancing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPlan {
    /// Host side of every committed game.
    pub locations: LocationAssignment,
    /// Filler games per team.
    pub filler: FillerGames,
    /// Teams left with residual imbalance.
    pub errors: ErrorReport,
}

/// Queue tier: unbalanced teams always pop before balanced ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Unbalanced,
    Settled,
}

type TeamPriority = (Tier, i64, u64);

#[derive(Debug, Clone)]
struct TeamState {
    balance: i32,
    filler_slots: usize,
    undecided: BTreeSet<String>,
    filler: FillerCount,
    /// `Some(true)` if the team was last short of home games.
    last_short_home: Option<bool>,
}

impl TeamState {
    fn shift(&mut self, delta: i32) {
        self.balance += delta;
        if self.balance != 0 {
            self.last_short_home = Some(self.balance > 0);
        }
    }
}

/// Assigns a location to every game in `schedule` and computes filler games.
///
/// `availability` is the post-scheduling snapshot (committed weeks already
/// removed); only the count of free weeks matters here. `preferences` is
/// the un-consumed request graph.
pub fn set_game_locations(
    schedule: &WeekSchedule,
    availability: &Availability,
    preferences: &RequestGraph,
    config: &SearchConfig,
    seed: u64,
) -> Result<LocationPlan, EngineError> {
    let mut balancer = Balancer::new(schedule, availability, preferences, config, seed)?;
    balancer.run();
    Ok(balancer.finish())
}

struct Balancer<'a> {
    states: BTreeMap<String, TeamState>,
    queue: LazyQueue<String, TeamPriority>,
    locations: LocationAssignment,
    preferences: &'a RequestGraph,
    config: &'a SearchConfig,
    rng: StdRng,
}

impl<'a> Balancer<'a> {
    fn new(
        schedule: &WeekSchedule,
        availability: &Availability,
        preferences: &'a RequestGraph,
        config: &'a SearchConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut states = BTreeMap::new();
        for (team, record) in availability.iter() {
            let undecided = schedule
                .games_of(team)
                .map(|games| games.keys().cloned().collect())
                .unwrap_or_default();
            let balance = record.balance;
            states.insert(
                team.to_string(),
                TeamState {
                    balance,
                    filler_slots: record.free_count().saturating_sub(config.bye_weeks),
                    undecided,
                    filler: FillerCount::default(),
                    last_short_home: (balance != 0).then_some(balance > 0),
                },
            );
        }
        if let Some((team, _)) = schedule.iter().find(|(team, _)| !states.contains_key(*team)) {
            return Err(EngineError::unknown_team(team));
        }
        for state in states.values() {
            if let Some(opponent) = state.undecided.iter().find(|o| !states.contains_key(*o)) {
                return Err(EngineError::unknown_team(opponent.as_str()));
            }
        }

        let mut balancer = Self {
            states,
            queue: LazyQueue::new(),
            locations: LocationAssignment::new(),
            preferences,
            config,
            rng: StdRng::seed_from_u64(seed),
        };
        let teams: Vec<String> = balancer.states.keys().cloned().collect();
        for team in &teams {
            balancer.requeue(team);
        }
        Ok(balancer)
    }

    /// Re-derives `team`'s tier and priority, or drops it if nothing is left to do.
    fn requeue(&mut self, team: &str) {
        let Some(state) = self.states.get(team) else {
            return;
        };
        let undecided = state.undecided.len() as i64;
        let priority = if state.balance != 0 && (undecided > 0 || state.filler_slots > 0) {
            Some((Tier::Unbalanced, -(i64::from(state.balance.abs()) + undecided)))
        } else if state.balance == 0 && undecided > 0 {
            Some((Tier::Settled, -undecided))
        } else {
            None
        };

        match priority {
            Some((tier, value)) => {
                let tiebreak = self.rng.random();
                self.queue.push(team.to_string(), (tier, value, tiebreak));
            }
            None => {
                self.queue.remove(&team.to_string());
            }
        }
    }

    fn run(&mut self) {
        while let Some((team, _)) = self.queue.pop() {
            let balance = self.states.get(&team).map_or(0, |s| s.balance);
            if balance != 0 {
                self.balance_team(&team);
            } else {
                self.break_tie(&team);
            }
            self.requeue(&team);
        }
    }

    /// Step 3: filler slots first, then ranked real games.
    fn balance_team(&mut self, team: &str) {
        self.absorb_with_filler(team);

        let ranked = self.rank_opponents(team);
        for opponent in ranked {
            let balance = self.states.get(team).map_or(0, |s| s.balance);
            if balance == 0 {
                break;
            }
            self.decide(team, &opponent, balance > 0);
            self.requeue(&opponent);
        }
    }

    /// Step 4: a balanced team decides one game, preferring stated wishes.
    fn break_tie(&mut self, team: &str) {
        let Some(state) = self.states.get(team) else {
            return;
        };
        let mut candidates: Vec<(bool, u64, String)> = Vec::with_capacity(state.undecided.len());
        for opponent in state.undecided.iter() {
            let wish = self.wish(team, opponent);
            candidates.push((wish.is_none(), self.rng.random(), opponent.clone()));
        }
        candidates.sort();

        if let Some((_, _, opponent)) = candidates.into_iter().next() {
            let hosts = match self.wish(team, &opponent) {
                Some(home) => home,
                None => self.rng.random_bool(0.5),
            };
            self.decide(team, &opponent, hosts);
            self.requeue(&opponent);
        }
    }

    fn absorb_with_filler(&mut self, team: &str) {
        let Some(state) = self.states.get_mut(team) else {
            return;
        };
        let used = state.filler_slots.min(state.balance.unsigned_abs() as usize);
        if used == 0 {
            return;
        }
        state.filler_slots -= used;
        if state.balance > 0 {
            state.filler.home += used as u32;
            state.shift(-(used as i32));
        } else {
            state.filler.away += used as u32;
            state.shift(used as i32);
        }
        trace!(team, used, balance = state.balance, "filler absorbed");
    }

    /// Orders undecided opponents: helpful preference first, hurtful last,
    /// then by mirrored-need distance `|own balance + opponent balance|`
    /// (0 when the opponent needs exactly the opposite of this team), then
    /// at random.
    fn rank_opponents(&mut self, team: &str) -> Vec<String> {
        let Some(state) = self.states.get(team) else {
            return Vec::new();
        };
        let wants_home = state.balance > 0;
        let balance = state.balance;

        let mut ranked: Vec<(u8, u32, u64, String)> = Vec::with_capacity(state.undecided.len());
        for opponent in state.undecided.iter() {
            let alignment = match self.wish(team, opponent) {
                Some(home) if home == wants_home => 0,
                None => 1,
                Some(_) => 2,
            };
            let other = self.states.get(opponent).map_or(0, |s| s.balance);
            let distance = (balance + other).unsigned_abs();
            ranked.push((alignment, distance, self.rng.random(), opponent.clone()));
        }
        ranked.sort();
        ranked.into_iter().map(|(_, _, _, opponent)| opponent).collect()
    }

    /// `team`'s stated wish to host `opponent`, if preferences are respected.
    fn wish(&self, team: &str, opponent: &str) -> Option<bool> {
        if !self.config.respect_preferences {
            return None;
        }
        self.preferences
            .preference(team, opponent)
            .or_else(|| self.preferences.preference(opponent, team).map(|p| !p))
    }

    /// Fixes the location of `team` vs `opponent` and updates both balances.
    fn decide(&mut self, team: &str, opponent: &str, team_hosts: bool) {
        let (host, guest) = if team_hosts {
            (team, opponent)
        } else {
            (opponent, team)
        };
        self.locations.set_home(host, guest);

        if let Some(state) = self.states.get_mut(host) {
            state.undecided.remove(guest);
            state.shift(-1);
        }
        if let Some(state) = self.states.get_mut(guest) {
            state.undecided.remove(host);
            state.shift(1);
        }
        trace!(host, guest, "location decided");
    }

    /// Steps 5-6: split leftover slots, report residuals.
    fn finish(self) -> LocationPlan {
        let mut plan = LocationPlan {
            locations: self.locations,
            ..Default::default()
        };

        for (team, mut state) in self.states {
            let leftover = state.filler_slots as u32;
            state.filler.home += leftover / 2;
            state.filler.away += leftover / 2;
            state.filler.flexible = leftover % 2;

            let mut residual = state.balance;
            if residual == 0
                && state.filler.flexible == 1
                && self.config.half_game_policy == HalfGamePolicy::CountAsImbalance
            {
                residual = match state.last_short_home {
                    Some(false) => -1,
                    _ => 1,
                };
            }

            plan.errors.push_imbalance(team.as_str(), residual);
            plan.filler.insert(team, state.filler);
        }
        plan
    }
}
