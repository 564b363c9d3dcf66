//! Matchup model.
//!
//! A matchup is an unordered pair of teams that requested a game against
//! each other. The pair is stored in canonical order (lexicographically
//! smaller team first) so that `(A, B)` and `(B, A)` are the same key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Week index within a season. The consumer defines the range (e.g. 0..14).
pub type Week = u32;

/// An unordered pair of teams, stored in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "MatchupRepr")]
pub struct Matchup {
    first: String,
    second: String,
}

/// Wire form; re-canonicalized on the way in.
#[derive(Deserialize)]
struct MatchupRepr {
    first: String,
    second: String,
}

impl From<MatchupRepr> for Matchup {
    fn from(repr: MatchupRepr) -> Self {
        Self::new(repr.first, repr.second)
    }
}

impl Matchup {
    /// Creates a matchup from two team names in any order.
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The lexicographically smaller team.
    #[inline]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger team.
    #[inline]
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Both teams, canonical order.
    pub fn teams(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }

    /// Whether `team` is one of the two sides.
    pub fn involves(&self, team: &str) -> bool {
        self.first == team || self.second == team
    }

    /// The other side of the matchup, if `team` is part of it.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.first == team {
            Some(&self.second)
        } else if self.second == team {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}
