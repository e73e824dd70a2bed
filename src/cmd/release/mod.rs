// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `mod release`: release build, release commit, and release tree.
//!
//! ```text
//! ensure clean ──> in sync with upstream ──> bump ──> changelog
//!   ──> dotnet build (Release) ──> About.xml
//!   ──> git commit "release vX.Y.Z" + tag vX.Y.Z ──> push
//!   ──> clear target ──> merge version branches (RimWorld)
//!                    └─> copy source tree (other games, --no-merge)
//!   ──> <archive_dir>/<name> vX.Y.Z.zip (when archive_dir is set)
//! ```

pub mod changelog;


use tracing::{debug, info, warn};

use crate::cli::release::ReleaseArgs;
use crate::config::Config;
use crate::config::types::BuildConfiguration;
use crate::context::Context;
use crate::dotnet::build_solution;
use crate::error::{GitError, ModError, Result};
use crate::git::cmd::{commit_all, push, tag};
use crate::git::ops::{ensure_clean, fetch_and_compare, upstream_branch};
use crate::logging::TaskSpan;
use crate::utility::fs::create_archive;
use crate::version::ModVersion;

use super::build::install_source;
use super::is_rimworld;
use super::merge::merge_into;
use super::project::{bump_version, update_about};
use changelog::update_changelog;

/// How the release tree is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseLayout {
    /// Merge every version branch.
    Merged,
    /// Copy the source tree as is.
    Copied,
}

/// Layout used for `context`.
#[must_use]
pub fn release_layout(context: &Context, args: &ReleaseArgs) -> ReleaseLayout {
    if is_rimworld(context) && !args.no_merge {
        ReleaseLayout::Merged
    } else {
        ReleaseLayout::Copied
    }
}

#[must_use]
pub fn release_message(version: &ModVersion) -> String {
    format!("release v{version}")
}

#[must_use]
pub fn release_tag(version: &ModVersion) -> String {
    format!("v{version}")
}

/// `<name> v<version>.zip`
#[must_use]
pub fn archive_name(context: &Context) -> String {
    format!("{} v{}.zip", context.mod_info.name, context.mod_info.version)
}

/// Refuse to release from a dirty work tree unless `force` is set.
///
/// # Errors
///
/// Returns `GitError::UncommittedChanges` if the tree is dirty and `force`
/// is not set, or a `GitError` if the status cannot be read.
pub fn check_uncommitted_changes(context: &Context, force: bool) -> Result<()> {
    match ensure_clean(&context.build.base_dir) {
        Err(ModError::Git(e)) if force && matches!(*e, GitError::UncommittedChanges { .. }) => {
            warn!(error = %e, "continuing despite uncommitted changes (--force)");
            Ok(())
        }
        result => Ok(result?),
    }
}

/// Refuse to release while the branch and its upstream differ. With
/// `force`, commits that are only local are pushed first; a branch behind
/// its upstream always fails. A branch without upstream is not checked.
///
/// # Errors
///
/// Returns `GitError::UnpushedCommits` (without `force`),
/// `GitError::BehindRemote`, or a `GitError` if fetch or push fail.
pub fn check_unpushed_commits(context: &Context, force: bool, dry_run: bool) -> Result<()> {
    let repo = &context.build.base_dir;
    let task = TaskSpan::start("check unpushed commits");
    let Some(upstream) = upstream_branch(repo)? else {
        task.warn("no upstream branch, skipping");
        return Ok(());
    };

    let divergence = fetch_and_compare(repo)?;
    if divergence.behind > 0 {
        return Err(ModError::from(GitError::BehindRemote {
            upstream,
            behind: divergence.behind,
        })
        .into());
    }
    if divergence.ahead > 0 {
        if !force {
            return Err(ModError::from(GitError::UnpushedCommits {
                upstream,
                ahead: divergence.ahead,
            })
            .into());
        }
        task.warn("continuing despite unpushed commits (--force)");
        if dry_run {
            info!("[DRY-RUN] would push {} commits to {upstream}", divergence.ahead);
        } else {
            push(repo)?;
            task.inform(format!("pushed {} commits", divergence.ahead));
        }
    }
    task.success(format!("in sync with {upstream}"));
    Ok(())
}

fn create_release_commit(context: &Context, dry_run: bool) -> Result<()> {
    let version = &context.mod_info.version;
    let message = release_message(version);
    let tag_name = release_tag(version);
    if dry_run {
        info!("[DRY-RUN] would commit '{message}' and tag {tag_name}");
        return Ok(());
    }
    if commit_all(&context.build.base_dir, &message)? {
        info!("committed '{message}'");
    } else {
        warn!("nothing to commit for '{message}'");
    }
    tag(&context.build.base_dir, &tag_name, &message)?;
    info!(tag = %tag_name, "tagged release");
    Ok(())
}

/// Push the release commit and tag, when the branch has an upstream.
fn push_release(context: &Context, dry_run: bool) -> Result<()> {
    let repo = &context.build.base_dir;
    let Some(upstream) = upstream_branch(repo)? else {
        warn!("no upstream branch, release commit not pushed");
        return Ok(());
    };
    if dry_run {
        info!("[DRY-RUN] would push to {upstream}");
        return Ok(());
    }
    let task = TaskSpan::start("push release");
    push(repo)?;
    task.success(upstream);
    Ok(())
}

/// Zip the release tree into the game's archive folder, when one is set.
fn create_release_archive(context: &Context, dry_run: bool) -> Result<()> {
    let Some(archive_dir) = &context.game.archive_dir else {
        debug!("no archive_dir in gameconfig.json, skipping archive");
        return Ok(());
    };
    let archive = context
        .build
        .base_dir
        .join(archive_dir)
        .join(archive_name(context));
    if dry_run {
        info!(archive = %archive.display(), "[DRY-RUN] would create release archive");
        return Ok(());
    }

    let task = TaskSpan::start("create release archive");
    let summary = create_archive(&context.build.target_dir, &archive)?;
    task.success(format!(
        "{} ({} files, {} bytes)",
        archive.display(),
        summary.files,
        summary.bytes
    ));
    Ok(())
}

/// Main handler for the release command.
///
/// # Errors
///
/// Returns an error if the work tree is dirty or has unpushed commits
/// (without `--force`), is behind its upstream, or any release step fails.
pub async fn run_release_command(
    context: &mut Context,
    args: &ReleaseArgs,
    config: &Config,
) -> Result<()> {
    let dry_run = config.global.dry;

    check_uncommitted_changes(context, args.force)?;
    check_unpushed_commits(context, args.force, dry_run)?;
    bump_version(context, args.bump_part(), dry_run)?;
    update_changelog(context, dry_run)?;
    build_solution(context, &config.build, BuildConfiguration::Release, dry_run).await?;
    if is_rimworld(context) {
        update_about(context, dry_run).await?;
    }
    create_release_commit(context, dry_run)?;
    push_release(context, dry_run)?;

    let target = context.build.target_dir.clone();
    match release_layout(context, args) {
        ReleaseLayout::Merged if dry_run => {
            info!(target = %target.display(), "[DRY-RUN] would merge version branches");
        }
        ReleaseLayout::Merged => {
            let summary = merge_into(context, config, target, true).await?;
            info!(
                versions = %summary.versions.join(", "),
                files = summary.files_copied(),
                "release tree merged"
            );
        }
        ReleaseLayout::Copied => {
            install_source(context, dry_run).await?;
        }
    }
    create_release_archive(context, dry_run)?;

    info!(version = %context.mod_info.version, "release complete");
    Ok(())
}
