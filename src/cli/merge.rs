// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `merge` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MergeArgs {
    /// Release tree to write (defaults to the mod's folder in the game's mod
    /// directory).
    #[arg(short = 't', long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Keeps the existing contents of the target directory.
    #[arg(long = "no-clear")]
    pub no_clear: bool,
}
