// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision reads and work tree checks used by `merge` and `release`.

use crate::error::{GitError, ModResult};
use std::path::Path;

use super::backend::{CommitInfo, Divergence, GitRemote, GitRevisions, ShellBackend};
use super::query::has_uncommitted_changes;

/// Local branch names, in git's order.
///
/// # Errors
///
/// Returns a `GitError` if `git branch` fails.
pub fn list_branches(repo_path: &Path) -> ModResult<Vec<String>> {
    ShellBackend::branches(repo_path)
}

/// Contents of `path` on `rev`, `None` if it does not exist there. `path`
/// uses `/` on every platform.
///
/// # Errors
///
/// Returns a `GitError` if the revision cannot be read.
pub fn show_file(repo_path: &Path, rev: &str, path: &str) -> ModResult<Option<String>> {
    ShellBackend::file_at(repo_path, rev, path)
}

/// # Errors
///
/// Returns `GitError::UncommittedChanges` if the work tree is dirty, or
/// another `GitError` if status cannot be read.
pub fn ensure_clean(repo_path: &Path) -> ModResult<()> {
    if has_uncommitted_changes(repo_path)? {
        return Err(GitError::UncommittedChanges {
            path: repo_path.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Commits since the most recent tag, or the whole history without one,
/// newest first. Returns the tag used as the lower bound.
///
/// # Errors
///
/// Returns a `GitError` if the log cannot be read.
pub fn commits_since_latest_tag(repo_path: &Path) -> ModResult<(Option<String>, Vec<CommitInfo>)> {
    let tag = ShellBackend::latest_tag(repo_path)?;
    let commits = ShellBackend::log(repo_path, tag.as_deref())?;
    Ok((tag, commits))
}

/// Nearest tag containing `rev`, if any.
///
/// # Errors
///
/// Returns a `GitError` if git cannot be run.
pub fn tag_containing(repo_path: &Path, rev: &str) -> ModResult<Option<String>> {
    ShellBackend::tag_containing(repo_path, rev)
}

/// Upstream of the current branch, `None` if it tracks nothing.
///
/// # Errors
///
/// Returns a `GitError` if git cannot be run.
pub fn upstream_branch(repo_path: &Path) -> ModResult<Option<String>> {
    ShellBackend::upstream(repo_path)
}

/// Fetch, then count commits on each side of HEAD and its upstream.
///
/// # Errors
///
/// Returns a `GitError` if the fetch fails or there is no upstream.
pub fn fetch_and_compare(repo_path: &Path) -> ModResult<Divergence> {
    ShellBackend::fetch(repo_path)?;
    ShellBackend::divergence(repo_path)
}

/// # Errors
///
/// Returns a `GitError` if the branches cannot be listed.
pub fn remote_branches(repo_path: &Path) -> ModResult<Vec<String>> {
    ShellBackend::remote_branches(repo_path)
}
