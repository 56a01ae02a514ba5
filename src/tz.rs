//! Conversion of absolute commit instants into civil time in one reference zone.
//!
//! Every calendar-day, hour and weekday value used by the aggregation goes
//! through [`ReferenceZone::normalize`]; nothing else in the crate looks at
//! the evaluator's local zone.

use crate::error::{GpulseError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use chrono_tz::Tz;
use std::fmt;
use tracing::warn;

/// UTC+08:00, used when no zone is configured or the configured one is unusable.
pub const DEFAULT_OFFSET_SECS: i32 = 8 * 3600;

const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl ReferenceZone {
    pub fn utc() -> Self {
        ReferenceZone::Fixed(Utc.fix())
    }

    pub fn default_offset() -> Self {
        FixedOffset::east_opt(DEFAULT_OFFSET_SECS)
            .map(ReferenceZone::Fixed)
            .unwrap_or_else(Self::utc)
    }

    /// Accepts `UTC`, `Z`, `UTC+8`, `GMT-05:30`, `+08:00`, `-0500` or an IANA name.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || GpulseError::InvalidTimeZone(input.to_string());

        if trimmed.is_empty() {
            return Err(invalid());
        }

        let upper = trimmed.to_ascii_uppercase();
        if upper == "UTC" || upper == "GMT" || upper == "Z" {
            return Ok(Self::utc());
        }

        let offset_part = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .or_else(|| upper.starts_with(['+', '-']).then_some(upper.as_str()));

        if let Some(offset) = offset_part {
            return parse_offset(offset)
                .map(ReferenceZone::Fixed)
                .ok_or_else(invalid);
        }

        trimmed
            .parse::<Tz>()
            .map(ReferenceZone::Named)
            .map_err(|_| invalid())
    }

    /// Resolves a configured setting, falling back to UTC+08:00 instead of failing.
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting {
            None => Self::default_offset(),
            Some(value) => Self::parse(value).unwrap_or_else(|err| {
                let fallback = Self::default_offset();
                warn!("{err}; falling back to {fallback}");
                fallback
            }),
        }
    }

    pub fn normalize(&self, instant: DateTime<Utc>) -> LocalStamp {
        let at = match self {
            ReferenceZone::Fixed(offset) => instant.with_timezone(offset),
            ReferenceZone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
        };
        LocalStamp { at }
    }

    /// The calendar date of `now` in this zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.normalize(now).day()
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::default_offset()
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceZone::Fixed(offset) => write!(f, "UTC{offset}"),
            ReferenceZone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

fn parse_offset(input: &str) -> Option<FixedOffset> {
    let (sign, body) = match input.as_bytes().first()? {
        b'+' => (1, &input[1..]),
        b'-' => (-1, &input[1..]),
        _ => return None,
    };
    if !body.is_ascii() {
        return None;
    }

    let (hours, minutes) = match body.split_once(':') {
        Some(parts) => parts,
        None if body.len() == 4 => body.split_at(2),
        None => (body, "0"),
    };
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    let secs = (hours * 3600 + minutes * 60) as i32;
    FixedOffset::east_opt(sign * secs)
}

/// A commit instant as seen in the reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalStamp {
    pub at: DateTime<FixedOffset>,
}

impl LocalStamp {
    pub fn day(&self) -> NaiveDate {
        self.at.date_naive()
    }

    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn weekday(&self) -> u32 {
        self.at.weekday().num_days_from_monday()
    }

    pub fn format(&self) -> String {
        self.at.format(STAMP_FORMAT).to_string()
    }
}
