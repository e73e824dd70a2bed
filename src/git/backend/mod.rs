// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backends.
//!
//! ```text
//!                 GixBackend   ShellBackend
//! GitQuery            x            x        HEAD, status
//! GitRevisions                     x        branches, <rev>:<path>, log, tags
//! GitMutation                      x        checkout, commit, init, branch, tag
//! GitRemote                        x        upstream, fetch, push
//! ```
//!
//! The merge reads status through gix and does everything that touches
//! the work tree through the `git` executable.

mod pure;
mod shell;

pub use pure::GixBackend;
pub use shell::ShellBackend;

use crate::error::ModResult;
use std::path::Path;

pub trait GitQuery {
    /// Whether `path` is inside a work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Short name of the checked out branch; `None` on a detached HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no repository is found or HEAD is unreadable.
    fn current_branch(path: &Path) -> ModResult<Option<String>>;

    /// Staged, unstaged or untracked changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if no repository is found or status fails.
    fn has_uncommitted_changes(path: &Path) -> ModResult<bool>;
}

/// One commit of `git log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    /// Author date, strict ISO 8601.
    pub date: String,
    pub author_name: String,
    pub author_email: String,
    /// First line of the message.
    pub subject: String,
}

/// Ahead/behind counts of HEAD against its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divergence {
    pub ahead: usize,
    pub behind: usize,
}

/// Reads from other revisions without touching the work tree.
pub trait GitRevisions {
    /// # Errors
    ///
    /// Returns a `GitError` if the branches cannot be listed.
    fn branches(repo_path: &Path) -> ModResult<Vec<String>>;

    /// Blob at `rev:path`, or `None` if the revision has no such file.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the blob exists but cannot be read.
    fn file_at(repo_path: &Path, rev: &str, path: &str) -> ModResult<Option<String>>;

    /// Most recent tag reachable from HEAD, `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run.
    fn latest_tag(repo_path: &Path) -> ModResult<Option<String>>;

    /// Commits reachable from HEAD but not from `since`, newest first.
    /// With `since` unset, the whole history of HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the log cannot be read.
    fn log(repo_path: &Path, since: Option<&str>) -> ModResult<Vec<CommitInfo>>;

    /// Nearest tag containing `rev` (`v1.2.0` for `v1.2.0~3`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run.
    fn tag_containing(repo_path: &Path, rev: &str) -> ModResult<Option<String>>;
}

pub trait GitMutation {
    /// # Errors
    ///
    /// Returns `GitError::CheckoutFailed` if git refuses, e.g. because of
    /// local changes that would be overwritten.
    fn checkout(repo_path: &Path, what: &str) -> ModResult<()>;

    /// # Errors
    ///
    /// Returns a `GitError` if `git init` fails.
    fn init_repo(path: &Path) -> ModResult<()>;

    /// `git add --all` and commit; `false` when the tree was already clean.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging or committing fails.
    fn commit_all(repo_path: &Path, message: &str) -> ModResult<bool>;

    /// Create `name` at HEAD and switch to it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch exists or cannot be created.
    fn create_branch(repo_path: &Path, name: &str) -> ModResult<()>;

    /// Annotated tag at HEAD.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the tag exists or cannot be created.
    fn tag(repo_path: &Path, name: &str, message: &str) -> ModResult<()>;
}

/// Tracking branches and publishing.
pub trait GitRemote {
    /// Upstream of the current branch (`origin/main`), `None` without one.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be run.
    fn upstream(repo_path: &Path) -> ModResult<Option<String>>;

    /// Remote tracking branches (`origin/main`).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branches cannot be listed.
    fn remote_branches(repo_path: &Path) -> ModResult<Vec<String>>;

    /// # Errors
    ///
    /// Returns a `GitError` if the remote cannot be reached.
    fn fetch(repo_path: &Path) -> ModResult<()>;

    /// Commits on HEAD missing upstream and the other way round.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if there is no upstream.
    fn divergence(repo_path: &Path) -> ModResult<Divergence>;

    /// Push the current branch and its annotated tags to its upstream.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected.
    fn push(repo_path: &Path) -> ModResult<()>;

    /// Track `remote/branch` from the local `branch`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote branch does not exist.
    fn track(repo_path: &Path, remote: &str, branch: &str) -> ModResult<()>;

    /// Push `branch` to `remote` and track it.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the push is rejected.
    fn push_upstream(repo_path: &Path, remote: &str, branch: &str) -> ModResult<()>;
}
