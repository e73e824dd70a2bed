// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! mod [global options] <command>
//! version | options | inis
//! config {mod|game}
//! bump [part] | set-version [X.Y.Z]
//! dependency {list|add|remove}
//! about | branches | merge
//! branch {create|upstream}
//! update | release
//! ```

pub mod branch;
pub mod build;
pub mod global;
pub mod merge;
pub mod project;
pub mod release;


use crate::cli::branch::BranchArgs;
use crate::cli::build::UpdateArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::merge::MergeArgs;
use crate::cli::project::{BumpArgs, ConfigArgs, DependencyArgs, SetVersionArgs};
use crate::cli::release::ReleaseArgs;
use clap::{Parser, Subcommand};

/// Mod Build Tool
///
/// Builds, versions and releases game mods.
#[derive(Debug, Parser)]
#[command(
    name = "mod",
    author,
    version,
    about = "Mod Build Tool",
    long_about = "modbuild-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds, versions and releases game mods. Run it from anywhere\n\
                  inside a mod folder; modinfo.json and gameconfig.json are found\n\
                  by searching upwards from the current directory.",
    after_help = "CONFIGURATION:\n\n\
                  Tool options are read from `mod.toml` in the current directory,\n\
                  then from every --ini file in order, then from MOD_* environment\n\
                  variables, then from --set. Later sources win. Use `mod options`\n\
                  to see the result and `mod inis` to see which files were read."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used.
    Inis,

    /// Creates a project file.
    Config(ConfigArgs),

    /// Increments the mod version.
    Bump(BumpArgs),

    /// Sets the mod version.
    #[command(name = "set-version")]
    SetVersion(SetVersionArgs),

    /// Manages mod dependencies.
    #[command(visible_alias = "dep")]
    Dependency(DependencyArgs),

    /// Regenerates About/About.xml from modinfo.json.
    About,

    /// Lists version branches in merge order.
    Branches,

    /// Merges all version branches into one release tree.
    Merge(MergeArgs),

    /// Creates branches and sets their upstream.
    Branch(BranchArgs),

    /// Builds the mod and installs it into the game's mod folder.
    Update(UpdateArgs),

    /// Builds a release, commits it and installs the merged release tree.
    Release(ReleaseArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
