// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Routes the files of one checked-out version into the release tree.
//!
//! ```text
//! <source>/Defs/Things.xml, version 1.1
//!     versioned?  yes --> <target>/1.1/Defs/Things.xml
//!                 no  --> <target>/Defs/Things.xml
//!                         <target>/1.1/Defs/Things.xml
//! ```

use semver::VersionReq;
use std::path::{Path, PathBuf};

use super::branches::VersionBranch;
use super::classify::VersionClassifier;
use crate::error::ModResult;
use crate::utility::fs::copy_file;

/// What happened to the files of one version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionReport {
    pub version: String,
    /// Files copied into `<target>/<version>/`.
    pub copied: usize,
    /// Files also copied to the shared root.
    pub shared: usize,
    /// Shared-root files of a version that should keep them in versioned
    /// folders.
    pub unversioned: Vec<PathBuf>,
}

/// Copies files from the work tree into the merged release tree.
#[derive(Debug)]
pub struct Reconciler<'a> {
    source: &'a Path,
    target: &'a Path,
    classifier: &'a VersionClassifier,
    versioned: &'a VersionReq,
}

impl<'a> Reconciler<'a> {
    #[must_use]
    pub const fn new(
        source: &'a Path,
        target: &'a Path,
        classifier: &'a VersionClassifier,
        versioned: &'a VersionReq,
    ) -> Self {
        Self {
            source,
            target,
            classifier,
            versioned,
        }
    }

    /// Copy `files` (relative to the source root) of the checked-out
    /// `branch`.
    ///
    /// # Errors
    ///
    /// Returns `FsError::CopyFailed` on the first copy that fails.
    pub async fn reconcile(
        &self,
        branch: &VersionBranch,
        files: &[PathBuf],
    ) -> ModResult<VersionReport> {
        let mut report = VersionReport {
            version: branch.name.clone(),
            ..VersionReport::default()
        };
        let expect_versioned = self.versioned.matches(&branch.version);

        for relative in files {
            let from = self.source.join(relative);
            if !self.classifier.is_versioned(relative, &branch.version) {
                if expect_versioned {
                    report.unversioned.push(relative.clone());
                }
                copy_file(&from, &self.target.join(relative)).await?;
                report.shared += 1;
            }
            copy_file(&from, &self.target.join(&branch.name).join(relative)).await?;
            report.copied += 1;
        }
        Ok(report)
    }
}
