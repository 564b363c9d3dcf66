//! Matchup scheduling domain models.
//!
//! Inputs (`RequestGraph`, `Availability`) describe what teams want and
//! when they are free; outputs (`WeekSchedule`, `LocationAssignment`,
//! `FillerGames`, `ErrorReport`) describe what the engine decided.
//!
//! # Domain Mappings
//!
//! | u-matchup | College football | Amateur league | Esports |
//! |-----------|------------------|----------------|---------|
//! | Team | Program | Club | Roster |
//! | Matchup | Non-conference game | Friendly | Scrim |
//! | Week | Season week | Matchday | Split week |
//! | Filler game | FCS/CPU opponent | Open date game | Pickup match |

mod availability;
mod filler;
mod matchup;
mod report;
mod request;
mod schedule;

pub use availability::{Availability, TeamAvailability};
pub use filler::{FillerCount, FillerGames};
pub use matchup::{Matchup, Week};
pub use report::{ErrorReport, ReportEntry, NO_OVERLAPPING_WEEKS};
pub use request::RequestGraph;
pub use schedule::{LocationAssignment, WeekSchedule};
