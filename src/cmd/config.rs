// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands.

use tracing::info;

use crate::cli::project::{ConfigArgs, ConfigResource, GameConfigArgs, ModConfigArgs};
use crate::config::Config;
use crate::context::{GAMECONFIG_FILE, GameConfig, MODINFO_FILE, ModInfo, create_json};
use crate::error::Result;

/// Display current configuration options.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Display loaded configuration files.
pub fn run_inis_command(config_files: &[String]) {
    if config_files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in config_files {
            println!("{line}");
        }
    }
}

/// Scaffold `modinfo.json` or `gameconfig.json`.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be
/// written.
pub fn run_config_command(args: &ConfigArgs, dry_run: bool) -> Result<()> {
    match &args.resource {
        ConfigResource::Mod(args) => create_mod_info(args, dry_run),
        ConfigResource::Game(args) => create_game_config(args, dry_run),
    }
}

fn create_mod_info(args: &ModConfigArgs, dry_run: bool) -> Result<()> {
    let mut info = ModInfo::scaffold(&args.name, &args.author);
    info.url.clone_from(&args.url);
    if let Some(target_dir) = &args.target_dir {
        info.target_dir.clone_from(target_dir);
    }

    if dry_run {
        info!(dir = %args.dir.display(), "[DRY-RUN] would create {MODINFO_FILE}");
        return Ok(());
    }
    create_json(&args.dir, MODINFO_FILE, &info, args.force)?;
    Ok(())
}

fn create_game_config(args: &GameConfigArgs, dry_run: bool) -> Result<()> {
    let mut game = GameConfig::scaffold(&args.name, args.target_dir.clone());
    game.steam_id = args.steam_id;

    if dry_run {
        info!(dir = %args.dir.display(), "[DRY-RUN] would create {GAMECONFIG_FILE}");
        return Ok(());
    }
    create_json(&args.dir, GAMECONFIG_FILE, &game, args.force)?;
    Ok(())
}
