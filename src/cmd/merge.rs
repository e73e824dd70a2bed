// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version branch commands.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::branch::{BranchAction, BranchArgs};
use crate::cli::merge::MergeArgs;
use crate::config::Config;
use crate::context::Context;
use crate::error::{GitError, ModError, Result};
use crate::git::cmd::{create_branch, set_upstream};
use crate::git::ops::remote_branches;
use crate::git::query::current_branch;
use crate::logging::TaskSpan;
use crate::merge::{MergeOptions, MergeSummary, merge_versions, version_branches};
use crate::utility::fs::clear_directory;

/// Print the version branches of the mod, oldest first.
///
/// # Errors
///
/// Returns an error if the branches cannot be listed.
pub fn run_branches_command(context: &Context) -> Result<()> {
    let branches = version_branches(&context.build.base_dir)?;
    if branches.is_empty() {
        println!("No version branches");
    }
    for branch in branches {
        println!("{branch}");
    }
    Ok(())
}

/// Remote used by `branch create -u` and `branch upstream`.
pub const REMOTE: &str = "origin";

/// Create a branch or set its upstream.
///
/// # Errors
///
/// Returns `GitError::RemoteBranchExists` if `create` names a branch the
/// remote already has, `GitError::DetachedHead` if `upstream` has no branch
/// to work on, or a `GitError` if git fails.
pub fn run_branch_command(context: &Context, args: &BranchArgs, dry_run: bool) -> Result<()> {
    let repo = &context.build.base_dir;
    match &args.action {
        BranchAction::Create { name, upstream } => {
            create_new_branch(repo, name, dry_run)?;
            if *upstream {
                track_upstream(repo, name, dry_run)?;
            }
            Ok(())
        }
        BranchAction::Upstream { branch } => {
            let branch = match branch {
                Some(branch) => branch.clone(),
                None => current_branch(repo)?
                    .ok_or_else(|| ModError::from(GitError::DetachedHead))?,
            };
            track_upstream(repo, &branch, dry_run)
        }
    }
}

fn create_new_branch(repo: &Path, name: &str, dry_run: bool) -> Result<()> {
    let task = TaskSpan::start("create branch");
    let remote_name = format!("{REMOTE}/{name}");
    if remote_branches(repo)?.contains(&remote_name) {
        return Err(ModError::from(GitError::RemoteBranchExists { name: remote_name }).into());
    }
    if dry_run {
        info!("[DRY-RUN] would create branch {name}");
        return Ok(());
    }
    create_branch(repo, name)?;
    task.success(name);
    Ok(())
}

fn track_upstream(repo: &Path, branch: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        info!("[DRY-RUN] would set upstream of {branch} to {REMOTE}/{branch}");
        return Ok(());
    }
    let task = TaskSpan::start("set upstream branch");
    let upstream = set_upstream(repo, REMOTE, branch)?;
    task.success(upstream);
    Ok(())
}

/// Merge options for the current mod writing to `target`.
#[must_use]
pub fn merge_options(context: &Context, config: &Config, target: PathBuf) -> MergeOptions {
    MergeOptions::builder()
        .with_source(context.build.base_dir.clone())
        .with_target(target)
        .with_include(context.game.include.clone())
        .with_exclude(context.game.exclude.clone())
        .with_config(config.merge.clone())
        .with_debug(config.global.debug)
        .build()
}

/// Merge every version branch into a release tree.
///
/// # Errors
///
/// Returns an error if the target cannot be cleared or the merge fails.
pub async fn run_merge_command(context: &Context, args: &MergeArgs, config: &Config) -> Result<()> {
    let target = args
        .target
        .clone()
        .unwrap_or_else(|| context.build.target_dir.clone());

    if config.global.dry {
        let branches = version_branches(&context.build.base_dir)?;
        let names: Vec<String> = branches.iter().map(ToString::to_string).collect();
        info!(
            target = %target.display(),
            "[DRY-RUN] would merge {}",
            names.join(", ")
        );
        return Ok(());
    }

    let summary = merge_into(context, config, target.clone(), !args.no_clear).await?;
    println!(
        "Merged {} ({} files) into {}",
        summary.versions.join(", "),
        summary.files_copied(),
        target.display()
    );
    Ok(())
}

/// Optionally clear `target`, then merge into it.
///
/// # Errors
///
/// Returns an error if the target cannot be cleared or the merge fails.
pub async fn merge_into(
    context: &Context,
    config: &Config,
    target: PathBuf,
    clear: bool,
) -> Result<MergeSummary> {
    if clear {
        clear_directory(&target).await?;
    }
    let options = merge_options(context, config, target);
    merge_versions(&options).await
}
