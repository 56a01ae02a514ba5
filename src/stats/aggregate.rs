use super::NormalizedCommit;
use crate::model::{AuthorTally, DailyCount, HeatmapCell, RecentCommit};
use crate::tz::LocalStamp;
use crate::util::{short_hash, subject_line};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub commits: usize,
    pub lines: u64,
    pub latest: Option<LocalStamp>,
}

/// Everything derived from one pass over the normalized commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregates {
    pub daily: Vec<DailyCount>,
    pub heatmap: Vec<HeatmapCell>,
    pub leaderboard: Vec<AuthorTally>,
    pub recent: Vec<RecentCommit>,
    pub totals: Totals,
    pub active_days: BTreeSet<NaiveDate>,
}

impl Aggregates {
    pub fn compute(commits: &[NormalizedCommit<'_>], leaderboard_size: usize, recent_count: usize) -> Self {
        Self {
            daily: daily_counts(commits),
            heatmap: heatmap(commits),
            leaderboard: leaderboard(commits, leaderboard_size),
            recent: recent_commits(commits, recent_count),
            totals: totals(commits),
            active_days: active_days(commits),
        }
    }
}

/// Commits per calendar day, ascending, days without commits omitted.
pub fn daily_counts(commits: &[NormalizedCommit<'_>]) -> Vec<DailyCount> {
    let mut day_map: HashMap<NaiveDate, usize> = HashMap::new();
    for commit in commits {
        *day_map.entry(commit.local.day()).or_insert(0) += 1;
    }

    let mut daily: Vec<_> = day_map
        .into_iter()
        .map(|(day, count)| DailyCount { day, count })
        .collect();
    daily.sort_by(|a, b| a.day.cmp(&b.day));
    daily
}

/// Non-zero (weekday, hour) cells ordered by weekday, then hour.
pub fn heatmap(commits: &[NormalizedCommit<'_>]) -> Vec<HeatmapCell> {
    let mut cell_map: HashMap<(u32, u32), usize> = HashMap::new();
    for commit in commits {
        *cell_map
            .entry((commit.local.weekday(), commit.local.hour()))
            .or_insert(0) += 1;
    }

    let mut cells: Vec<_> = cell_map
        .into_iter()
        .map(|((weekday, hour), count)| HeatmapCell { weekday, hour, count })
        .collect();
    cells.sort_by_key(|c| (c.weekday, c.hour));
    cells
}

/// Top `limit` authors by commit count; equal counts keep first-seen order.
pub fn leaderboard(commits: &[NormalizedCommit<'_>], limit: usize) -> Vec<AuthorTally> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<AuthorTally> = Vec::new();

    for commit in commits {
        let author = commit.record.author.as_str();
        let slot = *slots.entry(author).or_insert_with(|| {
            tallies.push(AuthorTally {
                name: author.to_string(),
                commits: 0,
            });
            tallies.len() - 1
        });
        tallies[slot].commits += 1;
    }

    // stable: tallies are already in first-seen order
    tallies.sort_by(|a, b| b.commits.cmp(&a.commits));
    tallies.truncate(limit);
    tallies
}

pub fn totals(commits: &[NormalizedCommit<'_>]) -> Totals {
    Totals {
        commits: commits.len(),
        lines: commits
            .iter()
            .fold(0u64, |sum, c| sum.saturating_add(c.record.lines_changed())),
        latest: commits.iter().map(|c| c.local).max(),
    }
}

pub fn active_days(commits: &[NormalizedCommit<'_>]) -> BTreeSet<NaiveDate> {
    commits.iter().map(|c| c.local.day()).collect()
}

/// The `count` most recent commits, newest first.
pub fn recent_commits(commits: &[NormalizedCommit<'_>], count: usize) -> Vec<RecentCommit> {
    let mut newest: Vec<&NormalizedCommit<'_>> = commits.iter().collect();
    newest.sort_by(|a, b| b.record.timestamp.cmp(&a.record.timestamp));

    newest
        .into_iter()
        .take(count)
        .map(|c| RecentCommit {
            hash: short_hash(&c.record.id),
            message: subject_line(&c.record.message),
            date: c.local.format(),
            lines: c.record.lines_changed(),
        })
        .collect()
}
