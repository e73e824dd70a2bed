// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Changelog kept in `modinfo.json`.
//!
//! ```text
//! git describe --tags --abbrev=0 --> v1.2.0 (none: whole history)
//! git log v1.2.0..HEAD           --> commits without "[nolog]"
//!   --> merged into modinfo.changelog by hash, newest first
//! ```

use chrono::DateTime;
use std::path::Path;
use tracing::{debug, info};

use crate::context::{AuthorInfo, ChangelogEntry, Context};
use crate::error::{GitError, ModResult, Result};
use crate::git::backend::CommitInfo;
use crate::git::ops::{commits_since_latest_tag, tag_containing};
use crate::logging::TaskSpan;
use crate::version::ModVersion;

/// Commits whose subject contains this stay out of the changelog.
pub const NOLOG_MARKER: &str = "[nolog]";

/// # Errors
///
/// Returns a `GitError` if the commit date is not ISO 8601.
pub fn changelog_entry(
    commit: &CommitInfo,
    version: Option<ModVersion>,
) -> ModResult<ChangelogEntry> {
    let date = DateTime::parse_from_rfc3339(&commit.date).map_err(|e| GitError::CommandFailed {
        command: "git log".to_string(),
        message: format!("invalid date '{}' on {}: {e}", commit.date, commit.hash),
    })?;
    Ok(ChangelogEntry {
        date,
        message: commit.subject.clone(),
        author: AuthorInfo {
            name: commit.author_name.clone(),
            email: Some(commit.author_email.clone()).filter(|email| !email.is_empty()),
            ..AuthorInfo::default()
        },
        hash: commit.hash.clone(),
        version,
    })
}

/// Changes since the latest tag, `[nolog]` commits left out.
///
/// # Errors
///
/// Returns a `GitError` if the history cannot be read.
pub fn collect_changes(repo_path: &Path) -> ModResult<Vec<ChangelogEntry>> {
    let (tag, commits) = commits_since_latest_tag(repo_path)?;
    debug!(since = tag.as_deref().unwrap_or("<root>"), commits = commits.len(), "git log");

    commits
        .iter()
        .filter(|commit| !commit.subject.contains(NOLOG_MARKER))
        .map(|commit| -> ModResult<ChangelogEntry> {
            let version = tag_containing(repo_path, &commit.hash)?
                .map(|tag| ModVersion::parse_lenient(&tag));
            changelog_entry(commit, version)
        })
        .collect()
}

/// Merge `changes` into `changelog` by hash and sort it newest first.
/// Returns the entries that were not listed before, newest first.
///
/// A known entry takes the new values but keeps its version when the new
/// one has none.
pub fn merge_changelog(
    changelog: &mut Vec<ChangelogEntry>,
    changes: Vec<ChangelogEntry>,
) -> Vec<ChangelogEntry> {
    let mut added = Vec::new();
    for change in changes {
        if let Some(entry) = changelog.iter_mut().find(|entry| entry.hash == change.hash) {
            let version = change.version.or(entry.version);
            *entry = ChangelogEntry { version, ..change };
        } else {
            added.push(change.clone());
            changelog.push(change);
        }
    }
    changelog.sort_by(|a, b| b.date.cmp(&a.date));
    added.sort_by(|a, b| b.date.cmp(&a.date));
    added
}

/// `2026-10-19 :: Jane Doe :: fix door`
#[must_use]
pub fn format_entry(entry: &ChangelogEntry) -> String {
    format!(
        "{} :: {} :: {}",
        entry.date.format("%Y-%m-%d"),
        entry.author.name,
        entry.message
    )
}

/// Add new commits to the changelog and save `modinfo.json` unless
/// `dry_run`. Unreadable history is logged and leaves the changelog as is.
///
/// # Errors
///
/// Returns an error if `modinfo.json` cannot be written.
pub fn update_changelog(context: &mut Context, dry_run: bool) -> Result<()> {
    let task = TaskSpan::start("update changelog");
    let changes = match collect_changes(&context.build.base_dir) {
        Ok(changes) => changes,
        Err(e) => {
            task.warn(format!("changelog not updated: {e}"));
            return Ok(());
        }
    };

    let added = merge_changelog(&mut context.mod_info.changelog, changes);
    if added.is_empty() {
        task.success("no new changes");
        return Ok(());
    }
    for entry in &added {
        task.inform(format_entry(entry));
    }

    if dry_run {
        info!("[DRY-RUN] would write {}", context.modinfo_path().display());
    } else {
        context.save_mod_info()?;
    }
    task.success(format!("{} new changes", added.len()));
    Ok(())
}
