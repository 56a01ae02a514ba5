use crate::cli::CommonArgs;
use crate::config::Config;
use crate::git::GitRepo;
use crate::model::CommitRecord;
use crate::source;
use crate::util::repo_display_name;
use anyhow::Context;

pub struct Fetched {
    pub repo_name: String,
    pub records: Vec<CommitRecord>,
}

/// Loads at most `config.max_commits` records from the JSON dump when one is
/// given, otherwise from the local or remote repository.
pub fn fetch_commits(common: &CommonArgs, config: &Config, show_progress: bool) -> anyhow::Result<Fetched> {
    if let Some(dump) = &common.from {
        let records = source::load_commits(dump, config.max_commits)
            .with_context(|| format!("Failed to read commits from {}", dump.display()))?;
        let repo_name = common.name.clone().unwrap_or_else(|| {
            let stem = dump.file_stem().map(|s| s.to_string_lossy().into_owned());
            repo_display_name(stem.as_deref().unwrap_or(""))
        });
        return Ok(Fetched { repo_name, records });
    }

    let repo = GitRepo::open(common.repo.as_deref()).context("Failed to open git repository")?;
    let records = repo
        .collect_commits(config.max_commits, show_progress)
        .context("Failed to collect commits from repository")?;
    let repo_name = common.name.clone().unwrap_or_else(|| repo.name());

    Ok(Fetched { repo_name, records })
}
