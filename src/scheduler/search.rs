//! Multi-start randomized search.
//!
//! Runs a seeded trial `trial(seed) -> (value, score)` for seeds
//! `0..iterations`, keeps the lowest score (ties go to the lower seed) and
//! stops at the first zero score.
//!
//! Trials are independent, so they may run in parallel batches. Batches are
//! reduced in seed order, which keeps the selected trial identical to the
//! sequential run.
//!
//! # Reference
//! Martí, Resende & Ribeiro (2013), "Multi-start methods for combinatorial
//! optimization", EJOR 226(1)

use rayon::prelude::*;
use tracing::debug;

use crate::error::EngineError;

/// Best trial found by [`multi_start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome<T> {
    /// Trial value.
    pub value: T,
    /// Trial score (lower is better).
    pub score: u64,
    /// Seed that produced the value.
    pub seed: u64,
    /// Trials considered, up to and including the first perfect one.
    pub trials_run: usize,
}

/// Runs up to `iterations` seeded trials and keeps the best.
pub fn multi_start<T, F>(
    iterations: usize,
    parallel: bool,
    trial: F,
) -> Result<TrialOutcome<T>, EngineError>
where
    T: Send,
    F: Fn(u64) -> Result<(T, u64), EngineError> + Sync,
{
    let mut tracker = BestTracker::new();
    if parallel {
        let batch = rayon::current_num_threads().max(1);
        let mut start = 0;
        while start < iterations && !tracker.done {
            let end = (start + batch).min(iterations);
            let results: Vec<_> = (start..end)
                .into_par_iter()
                .map(|i| (i as u64, trial(i as u64)))
                .collect();
            for (seed, result) in results {
                let (value, score) = result?;
                if tracker.offer(seed, value, score) {
                    break;
                }
            }
            start = end;
        }
    } else {
        for seed in 0..iterations as u64 {
            let (value, score) = trial(seed)?;
            if tracker.offer(seed, value, score) {
                break;
            }
        }
    }
    tracker.finish()
}

struct BestTracker<T> {
    best: Option<TrialOutcome<T>>,
    trials_run: usize,
    done: bool,
}

impl<T> BestTracker<T> {
    fn new() -> Self {
        Self {
            best: None,
            trials_run: 0,
            done: false,
        }
    }

    /// Returns true once a perfect trial has been seen.
    fn offer(&mut self, seed: u64, value: T, score: u64) -> bool {
        self.trials_run += 1;
        if self.best.as_ref().map_or(true, |best| score < best.score) {
            debug!(seed, score, "improved trial");
            self.best = Some(TrialOutcome {
                value,
                score,
                seed,
                trials_run: 0,
            });
        }
        self.done = score == 0;
        self.done
    }

    fn finish(self) -> Result<TrialOutcome<T>, EngineError> {
        let trials_run = self.trials_run;
        self.best
            .map(|best| TrialOutcome { trials_run, ..best })
            .ok_or_else(|| EngineError::InvalidConfig("iteration cap must be positive".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Score falls with the seed's distance from `target`.
    fn dip(target: u64) -> impl Fn(u64) -> Result<(u64, u64), EngineError> + Sync {
        move |seed| Ok((seed * 10, seed.abs_diff(target)))
    }

    #[test]
    fn test_keeps_lowest_score() {
        let best = multi_start(5, false, dip(10)).unwrap();
        assert_eq!(best.seed, 4);
        assert_eq!(best.score, 6);
        assert_eq!(best.value, 40);
        assert_eq!(best.trials_run, 5);
    }

    #[test]
    fn test_stops_on_perfect_trial() {
        let best = multi_start(100, false, dip(3)).unwrap();
        assert_eq!(best.seed, 3);
        assert_eq!(best.score, 0);
        assert_eq!(best.trials_run, 4);
    }

    #[test]
    fn test_ties_keep_first_seed() {
        let best = multi_start(10, false, |seed| Ok((seed, 5))).unwrap();
        assert_eq!(best.seed, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let score = |seed: u64| -> Result<(u64, u64), EngineError> { Ok((seed, (seed * 7919) % 13)) };
        for cap in [1, 3, 17, 40] {
            let seq = multi_start(cap, false, score).unwrap();
            let par = multi_start(cap, true, score).unwrap();
            assert_eq!(seq, par, "cap {cap}");
        }
    }

    #[test]
    fn test_monotonic_improvement() {
        let score = |seed: u64| -> Result<((), u64), EngineError> { Ok(((), (seed * 31 + 7) % 11 + 1)) };
        let mut last = u64::MAX;
        for cap in 1..30 {
            let best = multi_start(cap, false, score).unwrap();
            assert!(best.score <= last);
            last = best.score;
        }
    }

    #[test]
    fn test_trial_error_propagates() {
        let err = multi_start(3, false, |seed| {
            if seed == 1 {
                Err(EngineError::unknown_team("X"))
            } else {
                Ok(((), 4))
            }
        })
        .unwrap_err();
        assert!(matches!(err, EngineError::UnknownTeam { .. }));
    }

    #[test]
    fn test_zero_iterations() {
        assert!(multi_start(0, false, dip(0)).is_err());
    }
}
