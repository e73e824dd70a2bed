// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commands editing `modinfo.json` and the generated About.xml.

use std::path::PathBuf;

use tracing::info;

use crate::cli::project::{
    AddDependencyArgs, BumpArgs, DependencyAction, DependencyArgs, SetVersionArgs,
};
use crate::context::dependency::{add_dependency, remove_dependency};
use crate::context::{Context, Dependency};
use crate::error::Result;
use crate::logging::TaskSpan;
use crate::manifest::{game_version, generate_manifest, write_manifest};
use crate::version::{ModVersion, VersionPart};

/// Location of the generated manifest inside the mod folder.
pub const ABOUT_FILE: &str = "About/About.xml";

/// Increment one part of the mod version and save it.
///
/// # Errors
///
/// Returns an error if `modinfo.json` cannot be written.
pub fn run_bump_command(context: &mut Context, args: &BumpArgs, dry_run: bool) -> Result<()> {
    let new = bump_version(context, args.part, dry_run)?;
    println!("{new}");
    Ok(())
}

/// Bump `part` and persist the result unless `dry_run`. Returns the new
/// version.
///
/// # Errors
///
/// Returns an error if `modinfo.json` cannot be written.
pub fn bump_version(context: &mut Context, part: VersionPart, dry_run: bool) -> Result<ModVersion> {
    let old = context.mod_info.version;
    let new = old.bump(part);
    context.mod_info.version = new;
    info!(part = %part, "version {old} -> {new}");

    if dry_run {
        info!("[DRY-RUN] would write {}", context.modinfo_path().display());
    } else {
        context.save_mod_info()?;
    }
    Ok(new)
}

/// Set the mod version outright or part by part.
///
/// # Errors
///
/// Returns an error if `modinfo.json` cannot be written.
pub fn run_set_version_command(
    context: &mut Context,
    args: &SetVersionArgs,
    dry_run: bool,
) -> Result<()> {
    let old = context.mod_info.version;
    let new = match &args.version {
        Some(text) => ModVersion::parse_lenient(text),
        None => old.with_parts(args.major, args.minor, args.build),
    };
    context.mod_info.version = new;
    info!("version {old} -> {new}");

    if dry_run {
        info!("[DRY-RUN] would write {}", context.modinfo_path().display());
    } else {
        context.save_mod_info()?;
    }
    println!("{new}");
    Ok(())
}

/// List, add, or remove dependencies.
///
/// # Errors
///
/// Returns an error if the edit is rejected or `modinfo.json` cannot be
/// written.
pub fn run_dependency_command(
    context: &mut Context,
    args: &DependencyArgs,
    dry_run: bool,
) -> Result<()> {
    match &args.action {
        DependencyAction::List => {
            for line in format_dependencies(context) {
                println!("{line}");
            }
            return Ok(());
        }
        DependencyAction::Add(add) => {
            add_dependency(&mut context.mod_info, dependency_from_args(add))?;
            info!(id = %add.id, kind = %add.kind, "added dependency");
        }
        DependencyAction::Remove(remove) => {
            let removed =
                remove_dependency(&mut context.mod_info, &remove.id, remove.version.as_deref())?;
            info!(id = %removed.id, kind = %removed.kind, "removed dependency");
        }
    }

    if dry_run {
        info!("[DRY-RUN] would write {}", context.modinfo_path().display());
        return Ok(());
    }
    context.save_mod_info()
}

fn dependency_from_args(args: &AddDependencyArgs) -> Dependency {
    Dependency {
        id: args.id.clone(),
        kind: args.kind,
        name: args.name.clone(),
        steam_id: args.steam_id,
        download: args.download.clone(),
        version: args.version.clone(),
    }
}

/// One line per dependency, or a placeholder when there are none.
#[must_use]
pub fn format_dependencies(context: &Context) -> Vec<String> {
    if context.mod_info.dependencies.is_empty() {
        return vec!["No dependencies".to_string()];
    }
    context
        .mod_info
        .dependencies
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Regenerate `About/About.xml` from `modinfo.json`.
///
/// # Errors
///
/// Returns an error if the game version cannot be read or the file cannot be
/// written.
pub async fn run_about_command(context: &Context, dry_run: bool) -> Result<()> {
    update_about(context, dry_run).await?;
    Ok(())
}

/// Write the mod's About.xml. Returns the path written.
///
/// # Errors
///
/// Returns an error if the game version cannot be read, `description.md` is
/// unreadable, or the manifest cannot be written.
pub async fn update_about(context: &Context, dry_run: bool) -> Result<PathBuf> {
    let task = TaskSpan::start("update About.xml");
    let version = game_version(&context.game.target_dir)?;
    let manifest = generate_manifest(context, &version)?;
    let path = context.build.base_dir.join(ABOUT_FILE);

    if dry_run {
        task.success(format!("[DRY-RUN] would write {} for {version}", path.display()));
        return Ok(path);
    }

    write_manifest(&manifest.into(), &path).await?;
    task.success(format!("{} for {version}", path.display()));
    Ok(path)
}
