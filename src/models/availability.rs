//! Team availability model.
//!
//! Each team carries a signed home/away balance and the set of weeks in
//! which it has no game yet.
//!
//! # Balance Convention
//! `balance > 0`: the team owes itself that many home games to reach parity.
//! `balance < 0`: it owes itself away games. A home game decrements the
//! balance, an away game increments it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Week, WeekSchedule};
use crate::error::EngineError;

/// Availability of a single team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAvailability {
    /// Home games owed (negative = away games owed).
    pub balance: i32,
    /// Weeks with no game booked.
    pub free_weeks: BTreeSet<Week>,
}

impl TeamAvailability {
    /// Creates a record from a balance and free weeks.
    pub fn new(balance: i32, free_weeks: impl IntoIterator<Item = Week>) -> Self {
        Self {
            balance,
            free_weeks: free_weeks.into_iter().collect(),
        }
    }

    /// Derives availability from games already on the calendar.
    ///
    /// `booked` lists the weeks that already hold a game, `home_games` says
    /// how many of those are at home, and the season spans weeks
    /// `0..season_weeks`. The resulting balance is `away - home`.
    pub fn from_booked_weeks(
        team: &str,
        booked: &[Week],
        home_games: usize,
        season_weeks: Week,
    ) -> Result<Self, EngineError> {
        if home_games > booked.len() {
            return Err(EngineError::InvalidHomeCount {
                team: team.to_string(),
                home_games,
                booked: booked.len(),
            });
        }

        let mut free_weeks: BTreeSet<Week> = (0..season_weeks).collect();
        for &week in booked {
            if !free_weeks.remove(&week) {
                return Err(EngineError::InvalidWeek {
                    team: team.to_string(),
                    week,
                });
            }
        }

        let away_games = booked.len() - home_games;
        Ok(Self {
            balance: away_games as i32 - home_games as i32,
            free_weeks,
        })
    }

    /// Number of free weeks.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free_weeks.len()
    }

    /// Whether `week` is free.
    #[inline]
    pub fn is_free(&self, week: Week) -> bool {
        self.free_weeks.contains(&week)
    }
}

/// Availability of every team taking part in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    teams: BTreeMap<String, TeamAvailability>,
}

impl Availability {
    /// Creates an empty availability map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a team record.
    pub fn with_team(
        mut self,
        team: impl Into<String>,
        balance: i32,
        free_weeks: impl IntoIterator<Item = Week>,
    ) -> Self {
        self.insert(team, TeamAvailability::new(balance, free_weeks));
        self
    }

    /// Inserts or replaces a team record.
    pub fn insert(&mut self, team: impl Into<String>, availability: TeamAvailability) {
        self.teams.insert(team.into(), availability);
    }

    /// Record for `team`.
    pub fn get(&self, team: &str) -> Option<&TeamAvailability> {
        self.teams.get(team)
    }

    /// Record for `team`, or `UnknownTeam`.
    pub fn require(&self, team: &str) -> Result<&TeamAvailability, EngineError> {
        self.teams
            .get(team)
            .ok_or_else(|| EngineError::unknown_team(team))
    }

    /// Whether `team` has a record.
    pub fn contains(&self, team: &str) -> bool {
        self.teams.contains_key(team)
    }

    /// Teams in order.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    /// Iterates `(team, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TeamAvailability)> {
        self.teams.iter().map(|(team, a)| (team.as_str(), a))
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether no team has a record.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Weeks in which both teams are free.
    pub fn common_free_weeks(&self, a: &str, b: &str) -> Result<BTreeSet<Week>, EngineError> {
        let fa = &self.require(a)?.free_weeks;
        let fb = &self.require(b)?.free_weeks;
        Ok(fa.intersection(fb).copied().collect())
    }

    /// Snapshot with every week committed in `schedule` removed from the
    /// owning team's free weeks. Balances are carried over unchanged.
    pub fn after_schedule(&self, schedule: &WeekSchedule) -> Result<Self, EngineError> {
        let mut snapshot = self.clone();
        for (team, games) in schedule.iter() {
            let record = snapshot
                .teams
                .get_mut(team)
                .ok_or_else(|| EngineError::unknown_team(team))?;
            for week in games.values() {
                record.free_weeks.remove(week);
            }
        }
        Ok(snapshot)
    }
}
