//! Request graph model.
//!
//! Maps each team to the opponents it asked to play, with an optional
//! home/away preference per opponent (`Some(true)` = wants to host,
//! `Some(false)` = wants to travel, `None` = no preference).
//!
//! # Symmetry
//! A well-formed graph is mirrored: if A lists B then B lists A, and any
//! preferences on both sides are complementary. Mirroring is established by
//! [`crate::validation::normalize_requests`]; the scheduler assumes it.
//!
//! The graph is consumed by the week assigner as matchups are committed,
//! so callers keep their own copy when the original is needed later.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Matchup;

/// Requested games per team, with optional home/away preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestGraph {
    requests: BTreeMap<String, BTreeMap<String, Option<bool>>>,
}

impl RequestGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mirrored request: `team` hosts when `prefers_home == Some(true)`.
    ///
    /// The opponent's entry receives the complementary preference.
    pub fn with_request(
        mut self,
        team: impl Into<String>,
        opponent: impl Into<String>,
        prefers_home: Option<bool>,
    ) -> Self {
        let (team, opponent) = (team.into(), opponent.into());
        self.insert(opponent.clone(), team.clone(), prefers_home.map(|p| !p));
        self.insert(team, opponent, prefers_home);
        self
    }

    /// Inserts a one-sided entry without mirroring.
    pub fn insert(
        &mut self,
        team: impl Into<String>,
        opponent: impl Into<String>,
        prefers_home: Option<bool>,
    ) {
        self.requests
            .entry(team.into())
            .or_default()
            .insert(opponent.into(), prefers_home);
    }

    /// Registers a team with no requests (keeps it visible as a key).
    pub fn insert_team(&mut self, team: impl Into<String>) {
        self.requests.entry(team.into()).or_default();
    }

    /// Teams that appear as keys, in order.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.requests.keys().map(String::as_str)
    }

    /// Whether `team` appears as a key.
    pub fn contains_team(&self, team: &str) -> bool {
        self.requests.contains_key(team)
    }

    /// Pending opponents of `team`, in order. Empty for unknown teams.
    pub fn opponents<'a>(&'a self, team: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.requests
            .get(team)
            .into_iter()
            .flat_map(|opps| opps.keys().map(String::as_str))
    }

    /// Full entry list of `team`.
    pub fn entries(&self, team: &str) -> Option<&BTreeMap<String, Option<bool>>> {
        self.requests.get(team)
    }

    /// Number of outstanding requests for `team`.
    pub fn outstanding(&self, team: &str) -> usize {
        self.requests.get(team).map_or(0, BTreeMap::len)
    }

    /// Whether `team` lists `opponent`.
    pub fn contains(&self, team: &str, opponent: &str) -> bool {
        self.requests
            .get(team)
            .is_some_and(|opps| opps.contains_key(opponent))
    }

    /// `team`'s stated preference against `opponent` (`Some(true)` = home).
    pub fn preference(&self, team: &str, opponent: &str) -> Option<bool> {
        self.requests
            .get(team)
            .and_then(|opps| opps.get(opponent).copied().flatten())
    }

    /// Removes both directions of a matchup. Missing entries are ignored.
    pub fn remove_matchup(&mut self, matchup: &Matchup) {
        let [a, b] = matchup.teams();
        if let Some(opps) = self.requests.get_mut(a) {
            opps.remove(b);
        }
        if let Some(opps) = self.requests.get_mut(b) {
            opps.remove(a);
        }
    }

    /// Distinct matchups, each pair counted once.
    pub fn matchups(&self) -> BTreeSet<Matchup> {
        self.requests
            .iter()
            .flat_map(|(team, opps)| opps.keys().map(move |opp| Matchup::new(team, opp)))
            .collect()
    }

    /// Every team named anywhere in the graph, as key or as opponent.
    pub fn all_teams(&self) -> BTreeSet<&str> {
        let mut teams: BTreeSet<&str> = self.teams().collect();
        for opps in self.requests.values() {
            teams.extend(opps.keys().map(String::as_str));
        }
        teams
    }

    /// Whether no requests remain.
    pub fn is_empty(&self) -> bool {
        self.requests.values().all(BTreeMap::is_empty)
    }

    /// Iterates `(team, entries)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Option<bool>>)> {
        self.requests.iter().map(|(team, opps)| (team.as_str(), opps))
    }
}
