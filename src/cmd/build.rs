// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `mod update`: bump, build, and install the mod into the game.

use anyhow::Context as _;
use tracing::{info, warn};

use crate::cli::build::UpdateArgs;
use crate::config::Config;
use crate::config::types::BuildConfiguration;
use crate::context::Context;
use crate::dotnet::build_solution;
use crate::error::Result;
use crate::logging::TaskSpan;
use crate::utility::fs::{clear_directory, copy_directory};

use super::is_rimworld;
use super::project::{bump_version, update_about};

/// Main handler for the update command.
///
/// # Errors
///
/// Returns an error if any step fails: saving the version, building the
/// solution, writing About.xml, or copying the mod.
pub async fn run_update_command(
    context: &mut Context,
    args: &UpdateArgs,
    config: &Config,
) -> Result<()> {
    let dry_run = config.global.dry;
    let configuration = if args.release {
        BuildConfiguration::Release
    } else {
        config.build.configuration
    };

    if !dry_run {
        tokio::fs::create_dir_all(&context.build.target_dir)
            .await
            .with_context(|| format!("failed to create {}", context.build.target_dir.display()))?;
    }

    if let Some(part) = args.bump_part() {
        bump_version(context, part, dry_run)?;
    }

    if args.no_build {
        warn!("skipping build (--no-build)");
    } else {
        build_solution(context, &config.build, configuration, dry_run).await?;
    }

    if is_rimworld(context) {
        update_about(context, dry_run).await?;
    }

    install_source(context, dry_run).await?;
    info!(version = %context.mod_info.version, "update complete");
    Ok(())
}

/// Replace the installed mod with a copy of the source tree. Returns the
/// number of files copied.
///
/// # Errors
///
/// Returns an error if the target cannot be cleared or a copy fails.
pub async fn install_source(context: &Context, dry_run: bool) -> Result<usize> {
    let paths = &context.build;
    if dry_run {
        info!(
            from = %paths.source_dir.display(),
            to = %paths.target_dir.display(),
            "[DRY-RUN] would install mod"
        );
        return Ok(0);
    }

    let task = TaskSpan::start("install mod");
    clear_directory(&paths.target_dir).await?;
    let copied = copy_directory(&paths.source_dir, &paths.target_dir, &context.game.exclude).await?;
    task.success(format!("{copied} files to {}", paths.target_dir.display()));
    Ok(copied)
}
