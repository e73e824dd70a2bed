// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use gix::status::UntrackedFiles;
use std::path::Path;

use super::GitQuery;
use crate::error::{GitError, ModResult};

/// Reads `.git/` in-process through gix.
pub struct GixBackend;

fn open(path: &Path) -> Result<gix::Repository, GitError> {
    gix::discover(path).map_err(|e| GitError::Discover(Box::new(e)))
}

fn status_failed(stage: &str) -> GitError {
    GitError::CommandFailed {
        command: "status".to_string(),
        message: format!("failed to {stage} repository status"),
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        open(path).is_ok()
    }

    fn current_branch(path: &Path) -> ModResult<Option<String>> {
        let repo = open(path)?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Head(Box::new(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn has_uncommitted_changes(path: &Path) -> ModResult<bool> {
        let repo = open(path)?;
        let mut changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| status_failed("prepare"))?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|_| status_failed("read"))?;
        Ok(changes.next().is_some())
    }
}
