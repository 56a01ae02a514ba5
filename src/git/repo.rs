use crate::error::{GpulseError, Result};
use crate::model::CommitRecord;
use crate::util::repo_display_name;
use chrono::{DateTime, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tempfile::TempDir;
use tracing::{debug, info, warn};

pub struct GitRepo {
    repo: Repository,
    name: String,
    // Declared after `repo` so the clone is removed only once the repository is closed.
    _clone_dir: Option<TempDir>,
}

/// Commit metadata gathered during the walk, before any diffing.
struct CommitHeader {
    id: ObjectId,
    author: String,
    timestamp: DateTime<Utc>,
    message: String,
    first_parent: Option<ObjectId>,
}

impl GitRepo {
    /// Open a local repository, clone a remote URL into a temporary directory,
    /// or discover the repository around the current dir if `None`.
    pub fn open(location: Option<&str>) -> Result<Self> {
        match location {
            Some(url) if is_remote_url(url) => Self::clone_remote(url),
            Some(path) => Self::open_local(Path::new(path)),
            None => Self::open_local(&std::env::current_dir()?),
        }
    }

    fn open_local(path: &Path) -> Result<Self> {
        let repo = discover(path)?;
        let root: PathBuf = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        let name = repo_display_name(&root.to_string_lossy());

        Ok(Self {
            repo,
            name,
            _clone_dir: None,
        })
    }

    fn clone_remote(url: &str) -> Result<Self> {
        let clone_err = |e: &dyn std::fmt::Display| GpulseError::Clone(format!("{url}: {e}"));
        let name = repo_display_name(url);
        let dir = TempDir::new()?;
        let dest = dir.path().join(&name);
        let interrupt = AtomicBool::new(false);

        info!(url, dest = %dest.display(), "cloning repository");
        let mut prepare = gix::prepare_clone(url, &dest).map_err(|e| clone_err(&e))?;
        let (mut checkout, _) = prepare
            .fetch_then_checkout(gix::progress::Discard, &interrupt)
            .map_err(|e| clone_err(&e))?;
        let (repo, _) = checkout
            .main_worktree(gix::progress::Discard, &interrupt)
            .map_err(|e| clone_err(&e))?;

        Ok(Self {
            repo,
            name,
            _clone_dir: Some(dir),
        })
    }

    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Commits reachable from HEAD, newest first, capped to `max_commits`.
    ///
    /// Only the kept commits are diffed. A commit whose diff cannot be computed
    /// is still returned, with its line count left empty.
    pub fn collect_commits(&self, max_commits: usize, show_progress: bool) -> Result<Vec<CommitRecord>> {
        let pb = if show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Walking history...");

        let mut headers = self.walk_headers(&pb)?;
        headers.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        headers.truncate(max_commits);
        debug!(kept = headers.len(), max_commits, "walked commit history");

        pb.set_message("Counting changed lines...");
        pb.set_position(0);

        let mut records = Vec::with_capacity(headers.len());
        for header in headers {
            let lines = match self.lines_changed(header.id, header.first_parent) {
                Ok(total) => Some(i64::try_from(total).unwrap_or(i64::MAX)),
                Err(e) => {
                    warn!("could not diff commit {}: {e}", header.id);
                    None
                }
            };

            records.push(CommitRecord {
                id: header.id.to_string(),
                author: header.author,
                timestamp: header.timestamp,
                message: header.message,
                lines,
            });
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(records)
    }

    /// Walks with gix's rev-walk, which stops at the shallow boundary.
    fn walk_headers(&self, pb: &ProgressBar) -> Result<Vec<CommitHeader>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_id = head.peel_to_commit_in_place()?.id;

        let walk = self
            .repo
            .rev_walk([head_id])
            .all()
            .map_err(|e| GpulseError::Walk(e.to_string()))?;

        let mut headers = Vec::new();
        for info in walk {
            let info = info.map_err(|e| GpulseError::Walk(e.to_string()))?;
            let commit = self.repo.find_commit(info.id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| GpulseError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            // a parent cut off by a shallow clone is treated like no parent at all
            let first_parent = commit
                .parent_ids()
                .next()
                .map(|id| id.detach())
                .filter(|id| self.repo.has_object(id));
            let author = commit.author()?;
            let message = commit.message()?;

            headers.push(CommitHeader {
                id: info.id,
                author: author.name.to_string(),
                timestamp,
                message: message.title.to_string(),
                first_parent,
            });
            pb.inc(1);
        }

        Ok(headers)
    }

    /// Added plus deleted lines against the first parent, or the empty tree for a root commit.
    fn lines_changed(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<u64> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let changes: Vec<ChangeDetached> = match parent_id {
            Some(parent_id) => {
                let parent_tree = self.repo.find_commit(parent_id)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut total = 0u64;
        for change in changes {
            total += self.change_lines(change)?;
        }
        Ok(total)
    }

    fn change_lines(&self, change: ChangeDetached) -> Result<u64> {
        let lines = match change {
            ChangeDetached::Addition { id, entry_mode, .. }
            | ChangeDetached::Deletion { id, entry_mode, .. } => {
                if !entry_mode.is_blob() {
                    return Ok(0);
                }
                let obj = self.repo.find_object(id)?;
                match blob_text(&obj) {
                    Some(text) => text.lines().count() as u64,
                    None => 0,
                }
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                entry_mode,
                ..
            }
            | ChangeDetached::Rewrite {
                source_id: previous_id,
                id,
                entry_mode,
                ..
            } => {
                if !entry_mode.is_blob() {
                    return Ok(0);
                }
                let old_obj = self.repo.find_object(previous_id)?;
                let new_obj = self.repo.find_object(id)?;
                match (blob_text(&old_obj), blob_text(&new_obj)) {
                    (Some(old), Some(new)) => {
                        let (added, deleted) = diff_line_counts(old, new);
                        added + deleted
                    }
                    _ => 0,
                }
            }
        };
        Ok(lines)
    }
}

/// `https://`, `ssh://`, `file://` and scp-like `user@host:path` locations.
pub fn is_remote_url(location: &str) -> bool {
    if location.contains("://") {
        return true;
    }
    match (location.find('@'), location.find(':'), location.find('/')) {
        (Some(at), Some(colon), slash) => at < colon && slash.map_or(true, |s| colon < s),
        _ => false,
    }
}

/// Text of a blob, or `None` for binary or non-UTF-8 content.
fn blob_text<'a>(object: &'a gix::Object<'_>) -> Option<&'a str> {
    let data = object.data.as_slice();
    if data.iter().take(8192).any(|&b| b == 0) {
        return None;
    }
    std::str::from_utf8(data).ok()
}

/// Added and deleted line counts of a Myers line diff, as `git diff --numstat` reports them.
fn diff_line_counts(old: &str, new: &str) -> (u64, u64) {
    let diff = TextDiff::from_lines(old, new);
    diff.iter_all_changes()
        .fold((0, 0), |(added, deleted), change| match change.tag() {
            ChangeTag::Insert => (added + 1, deleted),
            ChangeTag::Delete => (added, deleted + 1),
            ChangeTag::Equal => (added, deleted),
        })
}

#[cfg(test)]
mod tests {
    use super::{diff_line_counts, is_remote_url};

    #[test]
    fn identical_text_has_no_changes() {
        assert_eq!(diff_line_counts("a\nb\n", "a\nb\n"), (0, 0));
    }

    #[test]
    fn appended_and_removed_lines() {
        assert_eq!(diff_line_counts("a\n", "a\nb\nc\n"), (2, 0));
        assert_eq!(diff_line_counts("a\nb\nc\n", "a\n"), (0, 2));
    }

    #[test]
    fn replaced_line_counts_both_ways() {
        assert_eq!(diff_line_counts("a\nx\nc\n", "a\ny\nc\n"), (1, 1));
    }

    #[test]
    fn long_block_insertion_counts_only_new_lines() {
        let old = "a\nb\nc\nd\ne\nf\n";
        let new = "1\n2\n3\n4\na\nb\nc\nd\ne\nf\n";
        assert_eq!(diff_line_counts(old, new), (4, 0));
    }

    #[test]
    fn long_block_removal_in_the_middle() {
        let old = "a\n1\n2\n3\n4\n5\nb\n";
        let new = "a\nb\n";
        assert_eq!(diff_line_counts(old, new), (0, 5));
    }

    #[test]
    fn recognizes_remote_locations() {
        assert!(is_remote_url("https://github.com/mdlldz/java.git"));
        assert!(is_remote_url("file:///tmp/repo"));
        assert!(is_remote_url("git@github.com:owner/tool.git"));
        assert!(!is_remote_url("/home/me/project"));
        assert!(!is_remote_url("relative/dir"));
        assert!(!is_remote_url("C:/work/repo"));
        assert!(!is_remote_url("./user@host/x:y"));
    }
}
