// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version branch discovery.
//!
//! ```text
//! git branch --> ["main", "1.1", "1.0", "1.10", "feature/x"]
//!            --> keep ^\d+\.\d+$ --> ["1.1", "1.0", "1.10"]
//!            --> sort by major.minor.0 --> ["1.0", "1.1", "1.10"]
//! ```

use anyhow::Context as _;
use regex::Regex;
use semver::Version;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::git::ops::list_branches;

/// A branch holding the release tree for one game version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBranch {
    /// Branch name, also the game version tag (`1.4`).
    pub name: String,
    /// `major.minor.0`, used for ordering and range checks.
    pub version: Version,
}

impl fmt::Display for VersionBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Coerce a `major.minor` tag to a semver version.
#[must_use]
pub fn coerce_version(tag: &str) -> Option<Version> {
    let (major, minor) = tag.split_once('.')?;
    Some(Version::new(major.parse().ok()?, minor.parse().ok()?, 0))
}

/// Keep the names that look like game versions and sort them ascending.
///
/// # Errors
///
/// Returns an error if the branch name pattern fails to compile.
pub fn select_version_branches<I, S>(names: I) -> Result<Vec<VersionBranch>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let pattern = Regex::new(r"^\d+\.\d+$").context("failed to compile branch regex")?;

    let mut branches: Vec<VersionBranch> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let version = pattern
                .is_match(name)
                .then(|| coerce_version(name))
                .flatten();
            if version.is_none() {
                debug!(branch = name, "not a version branch");
            }
            version.map(|version| VersionBranch {
                name: name.to_string(),
                version,
            })
        })
        .collect();

    // shortest name first among equal versions, so `1.1` wins over `01.1`
    branches.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.name.len().cmp(&b.name.len()))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut unique: Vec<VersionBranch> = Vec::with_capacity(branches.len());
    for branch in branches {
        if let Some(kept) = unique.last().filter(|kept| kept.version == branch.version) {
            warn!(
                branch = %branch,
                kept = %kept,
                "duplicate version branch skipped"
            );
            continue;
        }
        unique.push(branch);
    }
    Ok(unique)
}

/// Version branches of the repository at `repo`, oldest first.
///
/// # Errors
///
/// Returns an error if the branches cannot be listed.
pub fn version_branches(repo: &Path) -> Result<Vec<VersionBranch>> {
    let names = list_branches(repo)?;
    select_version_branches(names)
}
