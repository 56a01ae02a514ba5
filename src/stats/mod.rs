pub mod aggregate;
pub mod streak;

pub use aggregate::{
    active_days, daily_counts, heatmap, leaderboard, recent_commits, totals, Aggregates, Totals,
};
pub use streak::{current_streak, StreakState};

use crate::model::CommitRecord;
use crate::tz::{LocalStamp, ReferenceZone};

/// A commit paired with its civil time in the reference zone.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedCommit<'a> {
    pub record: &'a CommitRecord,
    pub local: LocalStamp,
}

/// Normalizes every record once, keeping the input sequence order.
pub fn normalize<'a>(records: &'a [CommitRecord], zone: &ReferenceZone) -> Vec<NormalizedCommit<'a>> {
    records
        .iter()
        .map(|record| NormalizedCommit {
            record,
            local: zone.normalize(record.timestamp),
        })
        .collect()
}
