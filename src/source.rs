//! Commit records read from a JSON dump, for histories fetched by other tools.
//!
//! Expected shape: an array of objects with `hash` (or `id`), `author`,
//! `date` (RFC 3339 string or epoch seconds, alias `timestamp`), `message`
//! and `lines`.

use crate::error::{GpulseError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RawCommit {
    #[serde(alias = "id")]
    hash: String,
    #[serde(default)]
    author: String,
    #[serde(alias = "timestamp")]
    date: Value,
    #[serde(default)]
    message: String,
    #[serde(default)]
    lines: Value,
}

pub fn load_commits(path: &Path, max_commits: usize) -> Result<Vec<CommitRecord>> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_commits(&text)?;
    debug!(path = %path.display(), count = records.len(), "loaded commit dump");
    Ok(cap_most_recent(records, max_commits))
}

pub fn parse_commits(text: &str) -> Result<Vec<CommitRecord>> {
    let raw: Vec<RawCommit> = serde_json::from_str(text)?;
    raw.into_iter().map(into_record).collect()
}

fn into_record(raw: RawCommit) -> Result<CommitRecord> {
    let timestamp = parse_instant(&raw.date).ok_or_else(|| {
        GpulseError::InvalidInput(format!("commit {}: unreadable date {}", raw.hash, raw.date))
    })?;
    let lines = parse_lines(&raw.lines);
    if lines.is_none() && !raw.lines.is_null() {
        warn!("commit {}: malformed lines value {}, counting it as 0", raw.hash, raw.lines);
    }

    Ok(CommitRecord {
        id: raw.hash,
        author: raw.author,
        timestamp,
        message: raw.message,
        lines,
    })
}

fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}

fn parse_lines(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX))),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Keeps the `max` most recent records without reordering the survivors.
pub fn cap_most_recent(records: Vec<CommitRecord>, max: usize) -> Vec<CommitRecord> {
    if records.len() <= max {
        return records;
    }

    let mut by_age: Vec<usize> = (0..records.len()).collect();
    by_age.sort_by(|&a, &b| records[b].timestamp.cmp(&records[a].timestamp));

    let mut keep = vec![false; records.len()];
    for &idx in by_age.iter().take(max) {
        keep[idx] = true;
    }

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, kept)| kept.then_some(record))
        .collect()
}
