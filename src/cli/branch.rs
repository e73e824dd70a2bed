// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch command arguments.
//!
//! ```text
//! branch create <name> [-u]   new branch at HEAD, optionally tracked on origin
//! branch upstream [branch]    track origin/<branch>, pushing it if missing
//! ```

use clap::{Args, Subcommand};

/// Arguments for the `branch` command.
#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    #[command(subcommand)]
    pub action: BranchAction,
}

/// Branch subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum BranchAction {
    /// Creates a branch at HEAD and checks it out.
    Create {
        /// Branch name, e.g. a game version such as 1.6.
        name: String,

        /// Also sets the upstream branch, creating it on origin.
        #[arg(short = 'u', long = "set-upstream")]
        upstream: bool,
    },

    /// Sets the upstream of a branch to origin.
    Upstream {
        /// Branch name (defaults to the current branch).
        branch: Option<String>,
    },
}
