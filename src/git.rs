//! Commit retrieval via git2.
//!
//! The analysis core never performs I/O; this module is the external
//! collaborator that turns a commit reference into the two strings the
//! pipeline consumes. Failures here are real errors (exit 2 territory),
//! unlike anything inside the pipeline.

use std::path::Path;

use chrono::{TimeZone, Utc};
use commitlens_core::{LensError, Result};
use git2::{DiffFormat, DiffOptions, Repository};

/// A commit loaded for auditing: its message, and its first-parent diff
/// rendered back to unified-diff text.
#[derive(Debug)]
pub struct CommitRecord {
    /// Abbreviated commit id.
    pub id: String,
    /// First line of the message.
    pub summary: String,
    /// Full message.
    pub message: String,
    /// Unified diff against the first parent (empty for merges).
    pub diff_text: String,
    /// More than one parent.
    pub is_merge: bool,
    /// Commit time, seconds since the epoch.
    pub timestamp: i64,
}

impl CommitRecord {
    /// Commit date in `YYYY-MM-DD` form (UTC).
    pub fn date(&self) -> String {
        match Utc.timestamp_opt(self.timestamp, 0) {
            chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
            _ => "unknown".to_string(),
        }
    }
}

fn git_err(err: git2::Error) -> LensError {
    LensError::Git(err.message().to_string())
}

/// Load a single commit by revision (anything `git rev-parse` accepts).
pub fn load_commit(repo_path: &Path, reference: &str) -> Result<CommitRecord> {
    let repo = Repository::discover(repo_path).map_err(git_err)?;
    let object = repo.revparse_single(reference).map_err(git_err)?;
    let commit = object.peel_to_commit().map_err(git_err)?;
    record_for(&repo, &commit)
}

/// Load the most recent `limit` commits reachable from HEAD.
pub fn recent_commits(repo_path: &Path, limit: usize) -> Result<Vec<CommitRecord>> {
    let repo = Repository::discover(repo_path).map_err(git_err)?;
    let mut revwalk = repo.revwalk().map_err(git_err)?;
    revwalk.push_head().map_err(git_err)?;

    let mut records = Vec::new();
    for oid in revwalk {
        if records.len() >= limit {
            break;
        }
        let oid = oid.map_err(git_err)?;
        let commit = repo.find_commit(oid).map_err(git_err)?;
        records.push(record_for(&repo, &commit)?);
    }
    Ok(records)
}

fn record_for(repo: &Repository, commit: &git2::Commit<'_>) -> Result<CommitRecord> {
    let is_merge = commit.parent_count() > 1;
    let message = commit.message().unwrap_or("").to_string();
    let summary = commit.summary().unwrap_or("").to_string();
    // merge diffs answer a different question; the audit skips them
    let diff_text = if is_merge {
        String::new()
    } else {
        diff_to_text(repo, commit)?
    };

    let mut id = commit.id().to_string();
    id.truncate(8);

    Ok(CommitRecord {
        id,
        summary,
        message,
        diff_text,
        is_merge,
        timestamp: commit.time().seconds(),
    })
}

/// Render the first-parent diff of a commit back to unified-diff text, with
/// rename detection enabled so the parser sees `rename from` / `rename to`.
fn diff_to_text(repo: &Repository, commit: &git2::Commit<'_>) -> Result<String> {
    let tree = commit.tree().map_err(git_err)?;
    let parent_tree = match commit.parent(0) {
        Ok(parent) => Some(parent.tree().map_err(git_err)?),
        // root commit: diff against the empty tree
        Err(_) => None,
    };

    let mut opts = DiffOptions::new();
    opts.context_lines(3);
    let mut diff = repo
        .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
        .map_err(git_err)?;

    let mut find = git2::DiffFindOptions::new();
    find.renames(true);
    diff.find_similar(Some(&mut find)).map_err(git_err)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => text.push(line.origin()),
            _ => {}
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(git_err)?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use std::fs;

    fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("tester", "tester@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn load_commit_roundtrips_through_the_parser() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        fs::write(dir.path().join("a.txt"), "one\n").unwrap();
        commit_all(&repo, "add a.txt");
        fs::write(dir.path().join("a.txt"), "one\ntwo\n").unwrap();
        commit_all(&repo, "update a.txt");

        let record = load_commit(dir.path(), "HEAD").unwrap();
        assert!(!record.is_merge);
        assert_eq!(record.summary, "update a.txt");

        let diff = commitlens_diff::parser::parse(&record.diff_text);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.files()[0].path(), "a.txt");
        assert_eq!(diff.files()[0].lines_added, 1);
        assert_eq!(diff.files()[0].lines_removed, 0);
    }

    #[test]
    fn root_commit_diffs_against_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("first.txt"), "hello\n").unwrap();
        commit_all(&repo, "add first.txt");

        let record = load_commit(dir.path(), "HEAD").unwrap();
        let diff = commitlens_diff::parser::parse(&record.diff_text);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff.files()[0].path_before, None);
        assert_eq!(diff.files()[0].lines_added, 1);
    }

    #[test]
    fn recent_commits_respects_limit_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        for i in 0..4 {
            fs::write(dir.path().join("f.txt"), format!("rev {i}\n")).unwrap();
            commit_all(&repo, &format!("commit {i}"));
        }

        let records = recent_commits(dir.path(), 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].summary, "commit 3");
        assert_eq!(records[1].summary, "commit 2");
    }

    #[test]
    fn bad_reference_is_a_git_error() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        let err = load_commit(dir.path(), "no-such-ref").unwrap_err();
        assert!(matches!(err, LensError::Git(_)));
    }
}
