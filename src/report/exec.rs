use super::{build_report, fetch_commits, output_json, output_summary, publish};
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::error::GpulseError;
use crate::tz::ReferenceZone;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub fn exec(common: CommonArgs, top: usize, recent: usize, output: PathBuf, json: bool) -> anyhow::Result<()> {
    let now = evaluation_instant(common.now.as_deref())?;
    let config = Config::default()
        .with_zone(ReferenceZone::from_setting(common.tz.as_deref()))
        .with_leaderboard_size(top)
        .with_max_commits(common.max_commits)
        .with_recent_count(recent)
        .with_output(output);

    let fetched = fetch_commits(&common, &config, !json && !common.quiet)?;
    let config = config.with_repo_name(fetched.repo_name);

    let report = build_report(&fetched.records, &config, now);

    if json {
        output_json(&report)?;
    } else {
        publish(&report, &config.output).context("Failed to publish report")?;
        if !common.quiet {
            output_summary(&report, Some(&config.output))?;
        }
    }

    Ok(())
}

pub fn exec_streak(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let now = evaluation_instant(common.now.as_deref())?;
    let config = Config::default()
        .with_zone(ReferenceZone::from_setting(common.tz.as_deref()))
        .with_max_commits(common.max_commits)
        .with_recent_count(0)
        .with_leaderboard_size(0);

    let fetched = fetch_commits(&common, &config, false)?;
    let config = config.with_repo_name(fetched.repo_name);
    let report = build_report(&fetched.records, &config, now);

    if json {
        let value = serde_json::json!({
            "repo": report.meta.repo,
            "streak": report.meta.streak,
            "evaluated_at": report.meta.generated,
            "timezone": report.meta.timezone,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", report.meta.streak);
    }
    Ok(())
}

fn evaluation_instant(now: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match now {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| GpulseError::InvalidDate(format!("--now '{s}': {e}")))
            .context("Failed to parse evaluation time"),
    }
}
