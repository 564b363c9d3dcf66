//! Filler games.
//!
//! Placeholder games against an unmodelled opponent. They soak up free
//! weeks beyond the reserved byes and absorb home/away imbalance that real
//! matchups could not fix.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filler games for one team.
///
/// `flexible` is 0 or 1: a single slot whose location is left open. It
/// counts as half a home game and half an away game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerCount {
    /// Filler games at home.
    pub home: u32,
    /// Filler games away.
    pub away: u32,
    /// Slots the end user may assign either way.
    pub flexible: u32,
}

impl FillerCount {
    /// Home games including the half share of flexible slots.
    pub fn home_games(&self) -> f64 {
        self.home as f64 + 0.5 * self.flexible as f64
    }

    /// Away games including the half share of flexible slots.
    pub fn away_games(&self) -> f64 {
        self.away as f64 + 0.5 * self.flexible as f64
    }

    /// Total filler slots used.
    pub fn total(&self) -> u32 {
        self.home + self.away + self.flexible
    }

    /// Net home-minus-away effect of the decided slots.
    pub fn net_home(&self) -> i32 {
        self.home as i32 - self.away as i32
    }
}

/// Filler games per team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillerGames {
    teams: BTreeMap<String, FillerCount>,
}

impl FillerGames {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a team's filler count.
    pub fn insert(&mut self, team: impl Into<String>, count: FillerCount) {
        self.teams.insert(team.into(), count);
    }

    /// Filler count of `team` (zero if absent).
    pub fn get(&self, team: &str) -> FillerCount {
        self.teams.get(team).copied().unwrap_or_default()
    }

    /// Iterates `(team, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FillerCount)> {
        self.teams.iter().map(|(team, count)| (team.as_str(), count))
    }

    /// Number of teams with an entry.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_games() {
        let c = FillerCount {
            home: 2,
            away: 1,
            flexible: 1,
        };
        assert!((c.home_games() - 2.5).abs() < 1e-10);
        assert!((c.away_games() - 1.5).abs() < 1e-10);
        assert_eq!(c.total(), 4);
        assert_eq!(c.net_home(), 1);
    }

    #[test]
    fn test_missing_team_is_zero() {
        let f = FillerGames::new();
        assert_eq!(f.get("Akron"), FillerCount::default());
    }
}
