//! Commit history aggregation: daily trend, weekday/hour heatmap, author
//! leaderboard and the current consecutive-day streak, all evaluated in one
//! configured reference time zone.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod model;
pub mod report;
pub mod source;
pub mod stats;
pub mod tz;
pub mod util;

pub use config::Config;
pub use error::{GpulseError, Result};
pub use model::{CommitRecord, Report};
pub use report::build_report;
pub use tz::ReferenceZone;
