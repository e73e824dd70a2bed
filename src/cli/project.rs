// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project file command arguments.
//!
//! ```text
//! config mod  --name N --author A [--dir D] [--force]   → modinfo.json
//! config game --target-dir T [--name N] [--dir D]       → gameconfig.json
//! bump [build|minor|major]
//! set-version X.Y.Z | --major N --minor N --build N
//! dependency list
//! dependency add ID --type T [--name N] [--steam-id ID] [--download URL] [--version V]
//! dependency remove ID [--version V]
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::context::DependencyKind;
use crate::version::VersionPart;

/// Arguments for the `config` command.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Project file to scaffold.
    #[command(subcommand)]
    pub resource: ConfigResource,
}

/// Project files `config` can create.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigResource {
    /// Creates modinfo.json.
    Mod(ModConfigArgs),

    /// Creates gameconfig.json.
    Game(GameConfigArgs),
}

/// Arguments for `config mod`.
#[derive(Debug, Clone, Args)]
pub struct ModConfigArgs {
    /// Mod name.
    #[arg(short = 'n', long)]
    pub name: String,

    /// Author name.
    #[arg(short = 'a', long)]
    pub author: String,

    /// Mod website.
    #[arg(long)]
    pub url: Option<String>,

    /// Folder inside the game's mod folder (defaults to the name without
    /// spaces).
    #[arg(long = "target-dir", value_name = "DIR")]
    pub target_dir: Option<String>,

    /// Directory in which to create the file.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrites an existing file.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for `config game`.
#[derive(Debug, Clone, Args)]
pub struct GameConfigArgs {
    /// Game name.
    #[arg(short = 'n', long, default_value = "RimWorld")]
    pub name: String,

    /// The game's mod folder, where mods are installed.
    #[arg(short = 't', long = "target-dir", value_name = "DIR")]
    pub target_dir: PathBuf,

    /// Steam app id of the game.
    #[arg(long = "steam-id")]
    pub steam_id: Option<u64>,

    /// Directory in which to create the file.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrites an existing file.
    #[arg(short = 'f', long)]
    pub force: bool,
}

/// Arguments for the `bump` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BumpArgs {
    /// Version part to increment.
    #[arg(value_enum, default_value_t = VersionPart::Build)]
    pub part: VersionPart,
}

/// Arguments for the `set-version` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SetVersionArgs {
    /// Full version, e.g. 1.2.3.
    #[arg(value_name = "VERSION", conflicts_with_all = ["major", "minor", "build"])]
    pub version: Option<String>,

    /// Sets the major version.
    #[arg(long)]
    pub major: Option<u64>,

    /// Sets the minor version.
    #[arg(long)]
    pub minor: Option<u64>,

    /// Sets the build number.
    #[arg(long)]
    pub build: Option<u64>,
}

/// Arguments for the `dependency` command.
#[derive(Debug, Clone, Args)]
pub struct DependencyArgs {
    #[command(subcommand)]
    pub action: DependencyAction,
}

/// Dependency subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum DependencyAction {
    /// Lists the dependencies of the mod.
    List,

    /// Adds a dependency.
    Add(AddDependencyArgs),

    /// Removes a dependency.
    Remove(RemoveDependencyArgs),
}

/// Arguments for `dependency add`.
#[derive(Debug, Clone, Args)]
pub struct AddDependencyArgs {
    /// Package id of the other mod.
    #[arg(value_name = "PACKAGE_ID")]
    pub id: String,

    /// Relationship to the other mod.
    #[arg(short = 't', long = "type", value_enum, default_value_t = DependencyKind::Required)]
    pub kind: DependencyKind,

    /// Display name (required for required dependencies).
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Steam Workshop file id.
    #[arg(long = "steam-id")]
    pub steam_id: Option<u64>,

    /// Download url for non-Steam users.
    #[arg(long)]
    pub download: Option<String>,

    /// Game version the dependency applies to.
    #[arg(long)]
    pub version: Option<String>,
}

/// Arguments for `dependency remove`.
#[derive(Debug, Clone, Args)]
pub struct RemoveDependencyArgs {
    /// Package id of the other mod.
    #[arg(value_name = "PACKAGE_ID")]
    pub id: String,

    /// Game version, when the id is listed for several versions.
    #[arg(long)]
    pub version: Option<String>,
}
