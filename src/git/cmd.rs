// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Work tree mutations through the `git` executable.

use crate::error::ModResult;
use std::path::Path;

use super::backend::{GitMutation, GitRemote, ShellBackend};

/// Switch to a branch, tag or commit.
///
/// # Errors
///
/// Returns `GitError::CheckoutFailed` if git refuses the checkout.
pub fn checkout(repo_path: &Path, what: &str) -> ModResult<()> {
    ShellBackend::checkout(repo_path, what)
}

/// # Errors
///
/// Returns a `GitError` if `git init` fails.
pub fn init_repo(path: &Path) -> ModResult<()> {
    ShellBackend::init_repo(path)
}

/// Stage and commit everything; `false` if there was nothing to commit.
///
/// # Errors
///
/// Returns a `GitError` if staging or committing fails.
pub fn commit_all(repo_path: &Path, message: &str) -> ModResult<bool> {
    ShellBackend::commit_all(repo_path, message)
}

/// Create `name` at HEAD and check it out.
///
/// # Errors
///
/// Returns a `GitError` if the branch already exists.
pub fn create_branch(repo_path: &Path, name: &str) -> ModResult<()> {
    ShellBackend::create_branch(repo_path, name)
}

/// # Errors
///
/// Returns a `GitError` if the tag already exists.
pub fn tag(repo_path: &Path, name: &str, message: &str) -> ModResult<()> {
    ShellBackend::tag(repo_path, name, message)
}

/// Push the current branch and annotated tags to its upstream.
///
/// # Errors
///
/// Returns a `GitError` if the push is rejected.
pub fn push(repo_path: &Path) -> ModResult<()> {
    ShellBackend::push(repo_path)
}

/// Make `remote/branch` the upstream of `branch`, pushing it first when
/// the remote does not have it yet. Returns the upstream name.
///
/// # Errors
///
/// Returns a `GitError` if the branch cannot be pushed or tracked.
pub fn set_upstream(repo_path: &Path, remote: &str, branch: &str) -> ModResult<String> {
    let upstream = format!("{remote}/{branch}");
    if ShellBackend::remote_branches(repo_path)?.contains(&upstream) {
        ShellBackend::track(repo_path, remote, branch)?;
    } else {
        ShellBackend::push_upstream(repo_path, remote, branch)?;
    }
    Ok(upstream)
}
