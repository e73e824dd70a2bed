// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository state, read in-process through gix.

use crate::error::ModResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// `None` on a detached HEAD.
///
/// # Errors
///
/// Returns a `GitError` if no repository is found or HEAD is unreadable.
pub fn current_branch(path: &Path) -> ModResult<Option<String>> {
    GixBackend::current_branch(path)
}

/// # Errors
///
/// Returns a `GitError` if no repository is found or status fails.
pub fn has_uncommitted_changes(path: &Path) -> ModResult<bool> {
    GixBackend::has_uncommitted_changes(path)
}
