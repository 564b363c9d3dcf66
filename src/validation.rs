//! Input validation for matchup requests.
//!
//! Checks structural integrity of a request graph before scheduling.
//! Detects:
//! - Teams with more requests than the cap (default [`DEFAULT_MAX_REQUESTS`])
//! - Teams without an availability record
//! - Teams requesting themselves
//! - Requests not mirrored by the opponent
//! - Both sides of a matchup asking to host (or both to travel)
//!
//! [`normalize_requests`] repairs what can be repaired: opponents that
//! submitted no list at all receive mirrored entries, and a one-sided
//! preference is complemented on the other side.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.1 (Representations of Graphs)

use crate::models::{Availability, RequestGraph};

/// Requests a single team may list unless a cap is given.
pub const DEFAULT_MAX_REQUESTS: usize = 4;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A team lists more opponents than allowed.
    TooManyRequests,
    /// A team has no availability record.
    UnknownTeam,
    /// A team lists itself as an opponent.
    SelfRequest,
    /// A team lists an opponent that does not list it back.
    UnmirroredRequest,
    /// Both sides want the same location.
    ConflictingPreference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request graph against team availability, with at most
/// [`DEFAULT_MAX_REQUESTS`] requests per team.
///
/// Checks:
/// 1. No team lists more than the cap
/// 2. Every team named in the graph has an availability record
/// 3. No team requests itself
/// 4. Every request is mirrored
/// 5. Mirrored preferences do not conflict
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_requests(requests: &RequestGraph, availability: &Availability) -> ValidationResult {
    validate_requests_with_cap(requests, availability, DEFAULT_MAX_REQUESTS)
}

/// [`validate_requests`] with a custom per-team request cap.
pub fn validate_requests_with_cap(
    requests: &RequestGraph,
    availability: &Availability,
    max_requests: usize,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (team, entries) in requests.iter() {
        if entries.len() > max_requests {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyRequests,
                format!(
                    "{team} has {} requests, at most {max_requests} allowed",
                    entries.len()
                ),
            ));
        }
    }

    for team in requests.all_teams() {
        if !availability.contains(team) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeam,
                format!("Team '{team}' has no availability record"),
            ));
        }
    }

    for (team, entries) in requests.iter() {
        for (opponent, preference) in entries {
            if opponent == team {
                errors.push(self_request(team));
            } else if !requests.contains(opponent, team) {
                errors.push(unmirrored(team, opponent));
            } else if team < opponent.as_str() {
                if let Some(err) = conflict(team, opponent, *preference, requests) {
                    errors.push(err);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns a mirrored copy of `requests`.
///
/// Opponents that are not keys receive mirrored entries; one-sided
/// preferences are complemented. Self-requests, requests missing from an
/// opponent's own list, and conflicting preferences are errors.
pub fn normalize_requests(requests: &RequestGraph) -> Result<RequestGraph, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fixes: Vec<(String, String, Option<bool>)> = Vec::new();

    for (team, entries) in requests.iter() {
        for (opponent, preference) in entries {
            if opponent == team {
                errors.push(self_request(team));
                continue;
            }
            if !requests.contains_team(opponent) {
                fixes.push((opponent.clone(), team.to_string(), preference.map(|p| !p)));
                continue;
            }
            if !requests.contains(opponent, team) {
                errors.push(unmirrored(team, opponent));
                continue;
            }

            let theirs = requests.preference(opponent, team);
            match (preference, theirs) {
                (None, Some(p)) => fixes.push((team.to_string(), opponent.clone(), Some(!p))),
                (Some(_), _) if team < opponent.as_str() => {
                    if let Some(err) = conflict(team, opponent, *preference, requests) {
                        errors.push(err);
                    }
                }
                _ => {}
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let mut normalized = requests.clone();
    for (team, opponent, preference) in fixes {
        normalized.insert(team, opponent, preference);
    }
    Ok(normalized)
}

fn self_request(team: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::SelfRequest,
        format!("{team} lists itself as an opponent"),
    )
}

fn unmirrored(team: &str, opponent: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::UnmirroredRequest,
        format!("{team} has {opponent} as an opponent, but {opponent} doesn't have {team} listed"),
    )
}

fn conflict(
    team: &str,
    opponent: &str,
    preference: Option<bool>,
    requests: &RequestGraph,
) -> Option<ValidationError> {
    let mine = preference?;
    let theirs = requests.preference(opponent, team)?;
    (mine == theirs).then(|| {
        ValidationError::new(
            ValidationErrorKind::ConflictingPreference,
            format!(
                "{team} and {opponent} both prefer to be {}",
                if mine { "home" } else { "away" }
            ),
        )
    })
}
