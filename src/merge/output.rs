// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use semver::VersionReq;
use std::path::{Path, PathBuf};
use tracing::info;

use super::branches::VersionBranch;
use crate::error::ModResult;
use crate::manifest::xml::{render_load_folders, write_document};
use crate::manifest::{ConsolidatedManifest, write_manifest};

pub const LOAD_FOLDERS_FILE: &str = "LoadFolders.xml";

/// Versions that get their own `LoadFolders.xml` entry. Older versions load
/// from the shared root.
#[must_use]
pub fn load_folder_versions(branches: &[VersionBranch], versioned: &VersionReq) -> Vec<String> {
    branches
        .iter()
        .filter(|branch| versioned.matches(&branch.version))
        .map(|branch| branch.name.clone())
        .collect()
}

/// Write `LoadFolders.xml` and the consolidated manifest below `target`.
/// Returns both paths.
///
/// # Errors
///
/// Returns `ManifestError::Write` if either document cannot be written.
pub async fn write_outputs(
    target: &Path,
    manifest_path: &str,
    manifest: &ConsolidatedManifest,
    load_folders: &[String],
) -> ModResult<(PathBuf, PathBuf)> {
    let folders_path = target.join(LOAD_FOLDERS_FILE);
    let xml = render_load_folders(load_folders, &folders_path.display().to_string())?;
    write_document(&folders_path, &xml).await?;
    info!(path = %folders_path.display(), "write load folders");

    let about_path = target.join(manifest_path);
    write_manifest(manifest, &about_path).await?;
    info!(path = %about_path.display(), "write manifest");

    Ok((folders_path, about_path))
}
