//! Greedy matchup schedulers, multi-start search and KPI evaluation.
//!
//! # Algorithm
//!
//! Two greedy, priority-driven passes, each repeated under many seeds by a
//! multi-start search that keeps the best trial:
//!
//! - **Week assignment** ([`find_schedule`]): most constrained matchup first,
//!   least contested week first.
//! - **Location assignment** ([`set_game_locations`]): most unbalanced team
//!   first, filler games before real games.
//!
//! [`do_schedule`] chains both. Neither pass is optimal; the search trades
//! trials for quality.
//!
//! # KPI
//!
//! [`OutcomeKpi`] summarizes placed matchups, residual imbalance and filler
//! usage.

mod engine;
mod kpi;
mod location;
mod queue;
mod registry;
mod search;
mod week;

pub use engine::{do_schedule, MatchupScheduler, ScheduleOutcome};
pub use kpi::OutcomeKpi;
pub use location::{set_game_locations, LocationPlan};
pub use queue::LazyQueue;
pub use registry::MatchupRegistry;
pub use search::{multi_start, TrialOutcome};
pub use week::{find_schedule, WeekAssignment};
