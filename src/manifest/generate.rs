// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build a [`Manifest`] for the checked-out branch from `modinfo.json`.
//!
//! ```text
//! modinfo.json ─┬─ name, author, url ──────────────> name, author, url
//!               ├─ author + name ──────────────────> packageId
//!               └─ dependencies
//!                    required ──> modDependencies + loadAfter
//!                    incompatible ──> incompatibleWith
//!                    loadBefore ──> loadBefore
//!                    loadAfter ──> loadAfter
//! <mods>/../Version.txt ──> supportedVersions = [major.minor]
//! description.md ──> description
//! ```

use anyhow::Context as _;
use regex::Regex;
use std::path::Path;
use tracing::warn;

use super::{Manifest, ModDependency, package_id};
use crate::context::{Context, DependencyKind};
use crate::error::{ConfigError, ModError, Result};
use crate::utility::fs::{WalkOptions, find_files};
use crate::version::ModVersion;

/// Game version (`major.minor`) from the `Version.txt` next to the game's
/// mod folder.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no `x.y.z` version.
pub fn game_version(game_mods_dir: &Path) -> Result<String> {
    // resolved lexically, the mod folder may not exist yet
    let path = game_mods_dir
        .parent()
        .unwrap_or(game_mods_dir)
        .join("Version.txt");
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read game version from {}", path.display()))?;
    let pattern =
        Regex::new(r"\d+\.\d+\.\d+").context("failed to compile game version regex")?;
    let found = pattern.find(&text).ok_or_else(|| {
        ModError::from(ConfigError::ParseError {
            path: path.display().to_string(),
            message: format!("no version number in '{}'", text.trim()),
        })
    })?;
    Ok(ModVersion::parse_lenient(found.as_str()).short())
}

/// Raw text of the first `description.md` below `base_dir`.
fn read_description(base_dir: &Path) -> Result<Option<String>> {
    let found = find_files(base_dir, "description.md", &WalkOptions::for_project_scan())?;
    let Some(path) = found.first() else {
        warn!(dir = %base_dir.display(), "description.md not found");
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

fn ids(context: &Context, kinds: &[DependencyKind]) -> Option<Vec<String>> {
    let ids: Vec<String> = context
        .mod_info
        .dependencies
        .iter()
        .filter(|d| kinds.contains(&d.kind))
        .map(|d| d.id.clone())
        .collect();
    (!ids.is_empty()).then_some(ids)
}

/// Manifest for the current branch, supporting only `game_version`.
///
/// # Errors
///
/// Returns an error if `description.md` exists but cannot be read.
pub fn generate_manifest(context: &Context, game_version: &str) -> Result<Manifest> {
    let info = &context.mod_info;

    let required: Vec<ModDependency> = info
        .dependencies_of(DependencyKind::Required)
        .map(|d| ModDependency {
            package_id: d.id.clone(),
            display_name: d.name.clone(),
            steam_workshop_url: d
                .steam_id
                .map(|id| format!("steam://url/CommunityFilePage/{id}")),
            download_url: d.download.clone(),
        })
        .collect();

    Ok(Manifest {
        name: info.name.clone(),
        author: info.author.name.clone(),
        package_id: package_id(&info.author.name, &info.name),
        url: info.url.clone(),
        supported_versions: vec![game_version.to_string()],
        description: read_description(&context.build.base_dir)?,
        mod_dependencies: (!required.is_empty()).then_some(required),
        incompatible_with: ids(context, &[DependencyKind::Incompatible]),
        load_before: ids(context, &[DependencyKind::LoadBefore]),
        load_after: ids(
            context,
            &[DependencyKind::LoadAfter, DependencyKind::Required],
        ),
        game_version: Some(game_version.to_string()),
    })
}
