// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release command arguments.
//!
//! ```text
//! release                bump minor, build, commit, merge
//! release --major (-M)   bump major instead
//! release --skip-bump    bump build only
//! release --force (-f)   continue with uncommitted changes, push
//!                        unpushed commits first
//! ```

use clap::Args;

use crate::version::VersionPart;

/// Arguments for the `release` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    /// Creates a new major release.
    #[arg(short = 'M', long, conflicts_with = "skip_bump")]
    pub major: bool,

    /// Only bumps the build number.
    #[arg(short = 'V', long = "skip-bump")]
    pub skip_bump: bool,

    /// Continues despite uncommitted changes and pushes unpushed commits.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Copies the plain source tree instead of merging version branches.
    #[arg(long = "no-merge")]
    pub no_merge: bool,
}

impl ReleaseArgs {
    /// Version part bumped for this release.
    #[must_use]
    pub const fn bump_part(&self) -> VersionPart {
        if self.skip_bump {
            VersionPart::Build
        } else if self.major {
            VersionPart::Major
        } else {
            VersionPart::Minor
        }
    }
}
