use crate::tz::ReferenceZone;
use std::path::PathBuf;

pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;
pub const DEFAULT_MAX_COMMITS: usize = 5000;
pub const DEFAULT_RECENT_COUNT: usize = 10;
pub const DEFAULT_OUTPUT: &str = "public/data.json";

/// Everything the pipeline needs to know about a run, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repo_name: String,
    pub zone: ReferenceZone,
    pub leaderboard_size: usize,
    pub max_commits: usize,
    pub recent_count: usize,
    pub output: PathBuf,
}

impl Config {
    pub fn new(repo_name: impl Into<String>) -> Self {
        Self {
            repo_name: repo_name.into(),
            ..Self::default()
        }
    }

    pub fn with_repo_name(mut self, repo_name: impl Into<String>) -> Self {
        self.repo_name = repo_name.into();
        self
    }

    pub fn with_zone(mut self, zone: ReferenceZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    pub fn with_max_commits(mut self, max: usize) -> Self {
        self.max_commits = max;
        self
    }

    pub fn with_recent_count(mut self, count: usize) -> Self {
        self.recent_count = count;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_name: "repository".to_string(),
            zone: ReferenceZone::default(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            max_commits: DEFAULT_MAX_COMMITS,
            recent_count: DEFAULT_RECENT_COUNT,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("java");
        assert_eq!(config.repo_name, "java");
        assert_eq!(config.zone, ReferenceZone::default_offset());
        assert_eq!(config.leaderboard_size, 10);
        assert_eq!(config.recent_count, 10);
        assert_eq!(config.max_commits, DEFAULT_MAX_COMMITS);
        assert_eq!(config.output, PathBuf::from("public/data.json"));
    }

    #[test]
    fn builder_overrides() {
        let config = Config::default()
            .with_repo_name("x")
            .with_zone(ReferenceZone::utc())
            .with_leaderboard_size(3)
            .with_max_commits(50)
            .with_recent_count(2)
            .with_output("out/report.json");
        assert_eq!(config.repo_name, "x");
        assert_eq!(config.zone, ReferenceZone::utc());
        assert_eq!(config.leaderboard_size, 3);
        assert_eq!(config.max_commits, 50);
        assert_eq!(config.recent_count, 2);
        assert_eq!(config.output, PathBuf::from("out/report.json"));
    }
}
