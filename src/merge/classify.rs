// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use semver::{Version, VersionReq};
use std::path::Path;

use crate::config::types::FolderRule;
use crate::error::{MergeError, ModError, ModResult};

/// Parse a version range from the configuration.
///
/// Every comparator needs an explicit operator: semver reads a bare `1.0`
/// as `^1.0`, which would also match every later `1.x`.
///
/// # Errors
///
/// Returns `MergeError::InvalidRule` if `range` is not a semver requirement
/// or a comparator lacks an operator.
pub fn parse_range(range: &str) -> ModResult<VersionReq> {
    let invalid = |message: String| -> ModError {
        MergeError::InvalidRule {
            range: range.to_string(),
            message,
        }
        .into()
    };

    if let Some(bare) = range
        .split(',')
        .map(str::trim)
        .find(|comparator| comparator.starts_with(|c: char| c.is_ascii_digit()))
    {
        return Err(invalid(format!(
            "'{bare}' has no operator, write '={bare}' for an exact version"
        )));
    }
    VersionReq::parse(range).map_err(|e| invalid(e.to_string()))
}

#[derive(Debug, Clone)]
struct Rule {
    range: VersionReq,
    folders: Vec<String>,
}

/// Decides whether a file lives in a folder that differs per game version.
///
/// The first rule whose range contains the version decides; with no
/// matching rule nothing is versioned.
#[derive(Debug, Clone)]
pub struct VersionClassifier {
    rules: Vec<Rule>,
}

impl VersionClassifier {
    /// # Errors
    ///
    /// Returns `MergeError::InvalidRule` for an unparsable range.
    pub fn from_rules(rules: &[FolderRule]) -> ModResult<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Ok(Rule {
                    range: parse_range(&rule.versions)?,
                    folders: rule.folders.clone(),
                })
            })
            .collect::<ModResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Whether the first segment of `relative` is a versioned folder for
    /// `version`.
    #[must_use]
    pub fn is_versioned(&self, relative: &Path, version: &Version) -> bool {
        let path = relative.to_string_lossy();
        let Some(first) = path.split(['/', '\\']).find(|s| !s.is_empty()) else {
            return false;
        };
        self.rules
            .iter()
            .find(|rule| rule.range.matches(version))
            .is_some_and(|rule| rule.folders.iter().any(|folder| folder == first))
    }
}
