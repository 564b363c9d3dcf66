//! Matchup scheduling for the U-Engine ecosystem.
//!
//! Assigns a week and a host to every game requested between teams, given
//! each team's free weeks and home/away balance, while maximizing placed
//! requests and minimizing residual imbalance.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Matchup`, `RequestGraph`, `Availability`,
//!   `WeekSchedule`, `LocationAssignment`, `FillerGames`, `ErrorReport`
//! - **`scheduler`**: Greedy week and location assigners, multi-start
//!   search, the two-phase `do_schedule` entry point and `OutcomeKpi`
//! - **`validation`**: Request graph checks and mirroring
//! - **`config`**: `SearchConfig` (trial caps, bye weeks, half game policy)
//! - **`error`**: `EngineError` for malformed input
//!
//! # Architecture
//!
//! Parsing free-text requests, resolving team names and talking to users
//! happen upstream. This crate consumes the resulting request graph and
//! availability and returns plain data.
//!
//! # Example
//!
//! ```
//! use u_matchup::config::SearchConfig;
//! use u_matchup::models::{Availability, RequestGraph};
//! use u_matchup::scheduler::do_schedule;
//!
//! let requests = RequestGraph::new().with_request("Kansas", "Missouri", Some(true));
//! let availability = Availability::new()
//!     .with_team("Kansas", 1, [0, 1, 2])
//!     .with_team("Missouri", -1, [1, 2, 3]);
//!
//! let outcome = do_schedule(&requests, &availability, &SearchConfig::default()).unwrap();
//! assert_eq!(outcome.locations.is_home("Kansas", "Missouri"), Some(true));
//! assert!(outcome.errors.is_empty());
//! ```
//!
//! # References
//!
//! - Rasmussen & Trick (2008), "Round robin scheduling: a survey", EJOR 188(3)
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography",
//!   Computers & Operations Research 37(1)

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
