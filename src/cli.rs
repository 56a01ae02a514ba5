use crate::config::{DEFAULT_LEADERBOARD_SIZE, DEFAULT_MAX_COMMITS, DEFAULT_OUTPUT, DEFAULT_RECENT_COUNT};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gpulse")]
#[command(about = "Commit trends, activity heatmap and current streak for a git repository")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, global = true, value_name = "PATH|URL", help = "Path to a git repository, or a URL to clone into a temporary directory")]
    pub repo: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        conflicts_with = "repo",
        help = "Read commits from a JSON dump instead of a repository"
    )]
    pub from: Option<PathBuf>,

    #[arg(long, global = true, help = "Repository name shown in the report")]
    pub name: Option<String>,

    #[arg(
        long,
        global = true,
        env = "GPULSE_TZ",
        help = "Reference time zone (UTC+8, +05:30, Europe/Berlin, ...); defaults to UTC+08:00"
    )]
    pub tz: Option<String>,

    #[arg(long, global = true, default_value_t = DEFAULT_MAX_COMMITS, help = "Only consider the most recent N commits")]
    pub max_commits: usize,

    #[arg(long, global = true, value_name = "RFC3339", help = "Evaluate \"today\" at this instant instead of the current time")]
    pub now: Option<String>,

    #[arg(long, short, global = true, help = "Log debug output to stderr")]
    pub verbose: bool,

    #[arg(long, short, global = true, help = "Suppress progress and summary output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the report and publish it as JSON
    Report {
        #[arg(long, default_value_t = DEFAULT_LEADERBOARD_SIZE, help = "Number of authors on the leaderboard")]
        top: usize,

        #[arg(long, default_value_t = DEFAULT_RECENT_COUNT, help = "Number of recent commits to include")]
        recent: usize,

        #[arg(long, short, env = "GPULSE_OUTPUT", default_value = DEFAULT_OUTPUT, help = "Where to write the report")]
        output: PathBuf,

        #[arg(long, help = "Print the report to stdout instead of writing a file")]
        json: bool,
    },
    /// Print the current commit streak
    Streak {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Report { top, recent, output, json } => {
                crate::report::exec(self.common, top, recent, output, json)
            }
            Commands::Streak { json } => crate::report::exec_streak(self.common, json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults() {
        let cli = Cli::try_parse_from(["gpulse", "report"]).unwrap();
        assert_eq!(cli.common.max_commits, DEFAULT_MAX_COMMITS);
        match cli.command {
            Commands::Report { top, recent, json, .. } => {
                assert_eq!(top, 10);
                assert_eq!(recent, 10);
                assert!(!json);
            }
            Commands::Streak { .. } => panic!("expected report"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gpulse", "streak", "--tz", "UTC", "--from", "commits.json"]).unwrap();
        assert_eq!(cli.common.tz.as_deref(), Some("UTC"));
        assert_eq!(cli.common.from, Some(PathBuf::from("commits.json")));
    }

    #[test]
    fn repo_and_dump_conflict() {
        assert!(Cli::try_parse_from(["gpulse", "--repo", ".", "--from", "c.json", "report"]).is_err());
    }
}
