use crate::error::{GpulseError, Result};
use crate::model::Report;
use console::style;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Writes the report next to `path` and renames it into place.
///
/// Readers of `path` see either the previous artifact or the complete new one.
pub fn publish(report: &Report, path: &Path) -> Result<()> {
    let publish_err = |source: std::io::Error| GpulseError::Publish {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(publish_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(publish_err)?;
    serde_json::to_writer_pretty(&mut tmp, report)?;
    tmp.write_all(b"\n").map_err(publish_err)?;
    tmp.as_file().sync_all().map_err(publish_err)?;
    tmp.persist(path).map_err(|e| publish_err(e.error))?;

    info!(path = %path.display(), commits = report.meta.total, "published report");
    Ok(())
}

pub fn output_json(report: &Report) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn output_summary(report: &Report, written_to: Option<&Path>) -> anyhow::Result<()> {
    let meta = &report.meta;

    println!("{}", style(format!("Commit Activity: {}", meta.repo)).bold());
    println!("{}", "─".repeat(50));

    if meta.total == 0 {
        println!("No commits found");
    } else {
        println!("Total commits:  {}", style(meta.total).cyan());
        println!("Lines changed:  {}", style(meta.total_lines).green());
        println!("Active days:    {}", style(meta.active_days).cyan());
        println!("Current streak: {} day(s)", style(meta.streak).yellow().bold());
        if let Some(updated) = &meta.updated {
            println!("Last commit:    {}", style(updated).dim());
        }
        if let Some(busiest) = report.heatmap.iter().max_by_key(|c| c.count) {
            let day = WEEKDAYS.get(busiest.weekday as usize).copied().unwrap_or("?");
            println!(
                "Busiest slot:   {} {:02}:00 ({} commits)",
                day, busiest.hour, busiest.count
            );
        }
    }

    if !report.authors.is_empty() {
        println!("\n{}", style("Top authors").bold());
        for (rank, author) in report.authors.iter().enumerate() {
            println!("  {:>2}. {:<30} {:>5}", rank + 1, author.name, author.commits);
        }
    }

    if !report.recent.is_empty() {
        println!("\n{}", style("Recent commits").bold());
        for commit in &report.recent {
            println!(
                "  {} {} {} (+{} lines)",
                style(&commit.hash).yellow(),
                style(&commit.date).dim(),
                commit.message,
                commit.lines
            );
        }
    }

    println!("\nTime zone: {}", meta.timezone);
    if let Some(path) = written_to {
        println!("Report written to {}", style(path.display()).green());
    }
    Ok(())
}
