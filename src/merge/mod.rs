// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-version release merge.
//!
//! Every local branch named like a game version (`1.0`, `1.1`, ...) holds
//! the mod as released for that version. The merge lays them out as one
//! release tree that RimWorld can load for any of them.
//!
//! ```text
//!                git show <branch>:About/About.xml (all branches, up front)
//!                          |
//!  branches ──> for each version (oldest first):
//!                 checkout ──> collect_files ──> Reconciler ──> <target>/...
//!                          |
//!               restore original branch
//!                          |
//!               consolidate(manifests) ──> <target>/About/About.xml
//!               versioned branches     ──> <target>/LoadFolders.xml
//! ```
//!
//! Resulting tree for branches `1.0` and `1.1`:
//!
//! ```text
//! <target>/
//!   About/About.xml        consolidated
//!   LoadFolders.xml        v1.1 -> 1.1
//!   Textures/...           shared files, newest version wins
//!   1.0/...                complete 1.0 tree
//!   1.1/...                complete 1.1 tree
//! ```

pub mod branches;
pub mod classify;
pub mod consolidate;
pub mod output;
pub mod reconcile;

#[cfg(test)]
mod tests;

use bon::Builder;
use semver::VersionReq;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::types::MergeConfig;
use crate::error::{MergeError, ModError, ModResult, Result};
use crate::git::backend::{GitMutation, GitQuery, GixBackend, ShellBackend};
use crate::git::ops::show_file;
use crate::logging::TaskSpan;
use crate::manifest::{Manifest, read_manifest};
use crate::utility::fs::{PathFilter, WalkOptions, collect_files};

pub use branches::{VersionBranch, version_branches};
pub use classify::VersionClassifier;
pub use consolidate::consolidate;
pub use reconcile::{Reconciler, VersionReport};

/// Inputs of a merge run.
#[derive(Debug, Clone, Builder)]
pub struct MergeOptions {
    /// Git work tree holding the version branches.
    #[builder(into, setters(name = with_source))]
    source: PathBuf,
    /// Release tree to write.
    #[builder(into, setters(name = with_target))]
    target: PathBuf,
    /// File include globs; empty means everything.
    #[builder(setters(name = with_include), default)]
    include: Vec<String>,
    #[builder(setters(name = with_exclude), default)]
    exclude: Vec<String>,
    #[builder(setters(name = with_config), default)]
    config: MergeConfig,
    /// Report shared-root files of versions that should not have any.
    #[builder(setters(name = with_debug), default = false)]
    debug: bool,
}

impl MergeOptions {
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Outcome of [`merge_versions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Walked versions, oldest first.
    pub versions: Vec<String>,
    pub reports: Vec<VersionReport>,
    pub load_folders_path: PathBuf,
    pub manifest_path: PathBuf,
}

impl MergeSummary {
    #[must_use]
    pub fn files_copied(&self) -> usize {
        self.reports.iter().map(|r| r.copied).sum()
    }
}

/// Read the manifest of every branch before anything is copied.
fn read_snapshots(
    source: &Path,
    branches: &[VersionBranch],
    manifest_path: &str,
) -> ModResult<Vec<Manifest>> {
    branches
        .iter()
        .map(|branch| -> ModResult<Manifest> {
            let xml = show_file(source, &branch.name, manifest_path)?.ok_or_else(|| {
                MergeError::ManifestNotFound {
                    branch: branch.name.clone(),
                    path: manifest_path.to_string(),
                }
            })?;
            let manifest = read_manifest(&xml, &format!("{}:{manifest_path}", branch.name))?;
            Ok(manifest.with_game_version(branch.name.clone()))
        })
        .collect()
}

async fn walk_branches(
    options: &MergeOptions,
    branches: &[VersionBranch],
    versioned: &VersionReq,
    task: &TaskSpan,
) -> Result<Vec<VersionReport>> {
    let classifier = VersionClassifier::from_rules(&options.config.rules)?;
    let filter = PathFilter::new(&options.include, &options.exclude)?;
    let walk = WalkOptions::for_mod_tree();
    let reconciler = Reconciler::new(&options.source, &options.target, &classifier, versioned);

    let mut reports = Vec::with_capacity(branches.len());
    for branch in branches {
        ShellBackend::checkout(&options.source, &branch.name)?;

        let files =
            collect_files(&options.source, &walk, &filter)?.into_complete_files(&options.source)?;
        task.inform(format!("{branch}: merging {} files", files.len()));

        let report = reconciler.reconcile(branch, &files).await?;
        if options.debug && !report.unversioned.is_empty() {
            let list: Vec<String> = report
                .unversioned
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            task.warn(format!("{branch}: {} not versioned", list.join(", ")));
        }
        reports.push(report);
    }
    Ok(reports)
}

/// Merge every version branch of `options.source` into `options.target`.
///
/// # Errors
///
/// Fails before copying anything if there are no version branches or a
/// branch has no manifest. Checkout, copy and write failures abort the run;
/// output written so far is left in place.
pub async fn merge_versions(options: &MergeOptions) -> Result<MergeSummary> {
    let task = TaskSpan::start("merge versions");
    let versioned = classify::parse_range(&options.config.versioned)?;

    let branches = version_branches(&options.source)?;
    if branches.is_empty() {
        return Err(ModError::from(MergeError::NoVersionBranches {
            path: options.source.display().to_string(),
        })
        .into());
    }
    debug!(
        branches = %branches.iter().map(|b| b.name.as_str()).collect::<Vec<_>>().join(", "),
        "version branches"
    );

    let snapshots = read_snapshots(&options.source, &branches, &options.config.manifest)?;

    if GixBackend::has_uncommitted_changes(&options.source)? {
        task.warn("work tree has uncommitted changes, they may leak into every version");
    }
    let original = GixBackend::current_branch(&options.source)?;

    let walked = walk_branches(options, &branches, &versioned, &task).await;

    if let Some(original) = original {
        let restored = ShellBackend::checkout(&options.source, &original);
        match (&walked, restored) {
            (Ok(_), Err(e)) => return Err(e.into()),
            (Err(_), Err(e)) => warn!(branch = %original, error = %e, "failed to restore branch"),
            (_, Ok(())) => debug!(branch = %original, "restored branch"),
        }
    }
    let reports = walked?;

    let manifest = consolidate(&snapshots);
    let load_folders = output::load_folder_versions(&branches, &versioned);
    let (load_folders_path, manifest_path) = output::write_outputs(
        &options.target,
        &options.config.manifest,
        &manifest,
        &load_folders,
    )
    .await?;

    let versions: Vec<String> = branches.into_iter().map(|b| b.name).collect();
    task.success(versions.join(", "));

    Ok(MergeSummary {
        versions,
        reports,
        load_folders_path,
        manifest_path,
    })
}
