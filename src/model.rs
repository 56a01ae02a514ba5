use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as delivered by a commit source. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Raw lines-changed statistic; `None` when it was missing or unreadable.
    pub lines: Option<i64>,
}

impl CommitRecord {
    /// Lines changed, with missing and negative values counted as zero.
    pub fn lines_changed(&self) -> u64 {
        self.lines.map_or(0, |n| n.max(0) as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Serialized as `[hour, weekday, count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(u32, u32, usize)", from = "(u32, u32, usize)")]
pub struct HeatmapCell {
    pub weekday: u32,
    pub hour: u32,
    pub count: usize,
}

impl From<HeatmapCell> for (u32, u32, usize) {
    fn from(cell: HeatmapCell) -> Self {
        (cell.hour, cell.weekday, cell.count)
    }
}

impl From<(u32, u32, usize)> for HeatmapCell {
    fn from((hour, weekday, count): (u32, u32, usize)) -> Self {
        Self { weekday, hour, count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTally {
    pub name: String,
    pub commits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCommit {
    pub hash: String,
    pub message: String,
    pub date: String,
    pub lines: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub dates: Vec<String>,
    pub values: Vec<usize>,
}

impl From<&[DailyCount]> for Trend {
    fn from(counts: &[DailyCount]) -> Self {
        Self {
            dates: counts.iter().map(|c| c.day.format("%Y-%m-%d").to_string()).collect(),
            values: counts.iter().map(|c| c.count).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub repo: String,
    pub generated: String,
    pub updated: Option<String>,
    pub total: usize,
    pub streak: u32,
    pub total_lines: u64,
    pub active_days: usize,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub version: u32,
    pub meta: ReportMeta,
    pub trend: Trend,
    pub heatmap: Vec<HeatmapCell>,
    pub authors: Vec<AuthorTally>,
    pub recent: Vec<RecentCommit>,
}
