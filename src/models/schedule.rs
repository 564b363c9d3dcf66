//! Schedule (solution) models.
//!
//! A [`WeekSchedule`] records the week assigned to each committed matchup;
//! a [`LocationAssignment`] records which side hosts it. Both are stored
//! symmetrically: every write touches both teams' entries.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Matchup, Week};

/// Week assigned to each committed matchup, per team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSchedule {
    games: BTreeMap<String, BTreeMap<String, Week>>,
}

impl WeekSchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits `matchup` to `week`, writing both directions.
    pub fn commit(&mut self, matchup: &Matchup, week: Week) {
        let [a, b] = matchup.teams();
        self.games
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), week);
        self.games
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), week);
    }

    /// Week of the game between `team` and `opponent`.
    pub fn week(&self, team: &str, opponent: &str) -> Option<Week> {
        self.games.get(team)?.get(opponent).copied()
    }

    /// Games of `team`: opponent → week.
    pub fn games_of(&self, team: &str) -> Option<&BTreeMap<String, Week>> {
        self.games.get(team)
    }

    /// Number of games `team` has.
    pub fn game_count(&self, team: &str) -> usize {
        self.games.get(team).map_or(0, BTreeMap::len)
    }

    /// Iterates `(team, games)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Week>)> {
        self.games.iter().map(|(team, games)| (team.as_str(), games))
    }

    /// Every committed matchup, once each.
    pub fn matchups(&self) -> BTreeSet<Matchup> {
        self.games
            .iter()
            .flat_map(|(team, games)| games.keys().map(move |opp| Matchup::new(team, opp)))
            .collect()
    }

    /// Number of committed matchups.
    pub fn len(&self) -> usize {
        self.games.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Whether nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Host side of each scheduled game, per team (`true` = this team hosts).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationAssignment {
    hosts: BTreeMap<String, BTreeMap<String, bool>>,
}

impl LocationAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `host` plays `guest` at home.
    pub fn set_home(&mut self, host: &str, guest: &str) {
        self.hosts
            .entry(host.to_string())
            .or_default()
            .insert(guest.to_string(), true);
        self.hosts
            .entry(guest.to_string())
            .or_default()
            .insert(host.to_string(), false);
    }

    /// Whether `team` hosts `opponent`. `None` if undecided.
    pub fn is_home(&self, team: &str, opponent: &str) -> Option<bool> {
        self.hosts.get(team)?.get(opponent).copied()
    }

    /// Home games decided for `team`.
    pub fn home_count(&self, team: &str) -> usize {
        self.hosts
            .get(team)
            .map_or(0, |games| games.values().filter(|&&home| home).count())
    }

    /// Away games decided for `team`.
    pub fn away_count(&self, team: &str) -> usize {
        self.hosts
            .get(team)
            .map_or(0, |games| games.values().filter(|&&home| !home).count())
    }

    /// Iterates `(team, opponent → hosts)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, bool>)> {
        self.hosts.iter().map(|(team, games)| (team.as_str(), games))
    }

    /// Number of decided games.
    pub fn len(&self) -> usize {
        self.hosts.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Whether no location has been decided.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> WeekSchedule {
        let mut s = WeekSchedule::new();
        s.commit(&Matchup::new("Miami", "Alabama"), 3);
        s.commit(&Matchup::new("Miami", "Arkansas"), 5);
        s
    }

    #[test]
    fn test_commit_is_symmetric() {
        let s = sample_schedule();
        assert_eq!(s.week("Miami", "Alabama"), Some(3));
        assert_eq!(s.week("Alabama", "Miami"), Some(3));
        assert_eq!(s.week("Alabama", "Arkansas"), None);
    }

    #[test]
    fn test_counts() {
        let s = sample_schedule();
        assert_eq!(s.len(), 2);
        assert_eq!(s.game_count("Miami"), 2);
        assert_eq!(s.game_count("Arkansas"), 1);
        assert_eq!(s.matchups().len(), 2);
    }

    #[test]
    fn test_empty_schedule() {
        let s = WeekSchedule::new();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert_eq!(s.game_count("Miami"), 0);
    }

    #[test]
    fn test_location_negation() {
        let mut l = LocationAssignment::new();
        l.set_home("Miami", "Alabama");
        l.set_home("Arkansas", "Miami");
        assert_eq!(l.is_home("Miami", "Alabama"), Some(true));
        assert_eq!(l.is_home("Alabama", "Miami"), Some(false));
        assert_eq!(l.is_home("Miami", "Arkansas"), Some(false));
        assert_eq!(l.home_count("Miami"), 1);
        assert_eq!(l.away_count("Miami"), 1);
        assert_eq!(l.len(), 2);
        assert_eq!(l.is_home("Miami", "LSU"), None);
    }
}
