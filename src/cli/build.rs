// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! --no-build (-N) implies --no-bump, conflicts with --release
//! --bump PART     ignored with --no-bump
//! ```

use clap::Args;

use crate::version::VersionPart;

/// Arguments for the `update` command.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    /// Builds in Release configuration.
    #[arg(short = 'R', long, conflicts_with = "no_build")]
    pub release: bool,

    /// Does not rebuild assemblies (implies --no-bump).
    #[arg(short = 'N', long = "no-build")]
    pub no_build: bool,

    /// Does not bump the version.
    #[arg(short = 'V', long = "no-bump")]
    pub no_bump: bool,

    /// Version part to bump.
    #[arg(short = 'v', long, value_enum, default_value_t = VersionPart::Build)]
    pub bump: VersionPart,
}

impl UpdateArgs {
    /// Part to bump, if any.
    #[must_use]
    pub const fn bump_part(&self) -> Option<VersionPart> {
        if self.no_bump || self.no_build {
            None
        } else {
            Some(self.bump)
        }
    }
}
