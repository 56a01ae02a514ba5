use crate::config::Config;
use crate::model::{CommitRecord, Report, ReportMeta, Trend, SCHEMA_VERSION};
use crate::stats::{self, Aggregates, StreakState};
use crate::tz::LocalStamp;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Runs the whole pipeline over records already in memory.
///
/// `now` is the evaluation instant that defines "today"; it is the only input
/// besides the records and the config, so equal arguments give equal reports.
pub fn build_report(records: &[CommitRecord], config: &Config, now: DateTime<Utc>) -> Report {
    let commits = stats::normalize(records, &config.zone);
    let aggregates = Aggregates::compute(&commits, config.leaderboard_size, config.recent_count);

    let generated = config.zone.normalize(now);
    let streak = StreakState::new(aggregates.active_days.clone(), generated.day()).current();

    debug!(
        commits = aggregates.totals.commits,
        active_days = aggregates.active_days.len(),
        streak,
        today = %generated.day(),
        "aggregated commit history"
    );

    assemble(config, generated, &aggregates, streak)
}

/// Merges already computed parts into the report document.
pub fn assemble(config: &Config, generated: LocalStamp, aggregates: &Aggregates, streak: u32) -> Report {
    Report {
        version: SCHEMA_VERSION,
        meta: ReportMeta {
            repo: config.repo_name.clone(),
            generated: generated.format(),
            updated: aggregates.totals.latest.map(|stamp| stamp.format()),
            total: aggregates.totals.commits,
            streak,
            total_lines: aggregates.totals.lines,
            active_days: aggregates.active_days.len(),
            timezone: config.zone.to_string(),
        },
        trend: Trend::from(aggregates.daily.as_slice()),
        heatmap: aggregates.heatmap.clone(),
        authors: aggregates.leaderboard.clone(),
        recent: aggregates.recent.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::ReferenceZone;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn commit(id: &str, author: &str, ts: DateTime<Utc>, lines: Option<i64>) -> CommitRecord {
        CommitRecord {
            id: id.to_string(),
            author: author.to_string(),
            timestamp: ts,
            message: format!("work on {id}"),
            lines,
        }
    }

    #[test]
    fn empty_history_gives_zero_state_report() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let report = build_report(&[], &Config::new("empty"), now);
        assert_eq!(report.meta.total, 0);
        assert_eq!(report.meta.streak, 0);
        assert_eq!(report.meta.total_lines, 0);
        assert_eq!(report.meta.updated, None);
        assert_eq!(report.meta.generated, "2024-06-01T20:00:00+08:00");
        assert!(report.trend.dates.is_empty());
        assert!(report.trend.values.is_empty());
        assert!(report.heatmap.is_empty());
        assert!(report.authors.is_empty());
        assert!(report.recent.is_empty());
    }

    #[test]
    fn today_is_judged_in_the_reference_zone() {
        // 23:30Z on May 31st is already June 1st at +08:00
        let now = Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap();
        let records = vec![
            commit("a", "x", Utc.with_ymd_and_hms(2024, 5, 31, 1, 0, 0).unwrap(), Some(3)),
            commit("b", "x", Utc.with_ymd_and_hms(2024, 5, 30, 1, 0, 0).unwrap(), Some(4)),
        ];

        let east = build_report(&records, &Config::new("r"), now);
        assert_eq!(east.meta.streak, 2);

        let west = build_report(
            &records,
            &Config::new("r").with_zone(ReferenceZone::parse("America/Los_Angeles").unwrap()),
            now,
        );
        // still May 31st in Los Angeles; commits land on May 30th and 29th local
        assert_eq!(west.meta.streak, 2);
        assert_eq!(west.trend.dates, vec!["2024-05-29", "2024-05-30"]);
        assert_eq!(west.meta.timezone, "America/Los_Angeles");
    }

    #[test]
    fn meta_reflects_totals() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 4, 0, 0).unwrap();
        let records = vec![
            commit("0123456789", "x", Utc.with_ymd_and_hms(2024, 5, 2, 3, 0, 0).unwrap(), Some(7)),
            commit("abcdefabcd", "y", Utc.with_ymd_and_hms(2024, 5, 1, 3, 0, 0).unwrap(), None),
        ];
        let report = build_report(&records, &Config::new("java").with_zone(ReferenceZone::utc()), now);
        assert_eq!(report.meta.repo, "java");
        assert_eq!(report.meta.total, 2);
        assert_eq!(report.meta.total_lines, 7);
        assert_eq!(report.meta.active_days, 2);
        assert_eq!(report.meta.streak, 2);
        assert_eq!(report.meta.updated.as_deref(), Some("2024-05-02T03:00:00+00:00"));
        assert_eq!(report.recent[0].hash, "0123456");
        assert_eq!(report.meta.timezone, "UTC+00:00");
    }
}
