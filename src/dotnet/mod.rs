// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Building the mod's .NET solution.
//!
//! ```text
//! base_dir --find *.sln--> Doors.sln
//!          --> dotnet build -p:Version=1.2.3 -p:AssemblyVersion=1.0.0 ... Doors.sln
//! ```


use std::path::{Path, PathBuf};

use crate::config::types::{BuildConfig, BuildConfiguration};
use crate::context::Context;
use crate::error::Result;
use crate::logging::TaskSpan;
use crate::process::ProcessBuilder;
use crate::utility::fs::{WalkOptions, find_files};
use crate::version::ModVersion;

/// First solution file below `base_dir`, skipping build output and
/// package folders.
///
/// # Errors
///
/// Returns an error if `base_dir` cannot be walked.
pub fn find_solution(base_dir: &Path) -> Result<Option<PathBuf>> {
    let found = find_files(base_dir, "*.sln", &WalkOptions::for_project_scan())?;
    Ok(found.into_iter().next())
}

/// MSBuild property arguments stamping the mod version and author into the
/// assemblies.
#[must_use]
pub fn build_args(
    version: &ModVersion,
    author: &str,
    configuration: BuildConfiguration,
) -> Vec<String> {
    vec![
        "build".to_string(),
        "-p:PostBuildEvent=".to_string(),
        format!("-p:Version={version}"),
        format!("-p:Company={author}"),
        format!("-p:FileVersion={version}"),
        format!("-p:AssemblyVersion={}", version.assembly_version()),
        format!("-p:Configuration={configuration}"),
    ]
}

/// Build the solution of the current mod. Returns the solution built, or
/// `None` if the mod has no solution.
///
/// # Errors
///
/// Returns a `ProcessError` if `dotnet` is missing or the build fails.
pub async fn build_solution(
    context: &Context,
    config: &BuildConfig,
    configuration: BuildConfiguration,
    dry_run: bool,
) -> Result<Option<PathBuf>> {
    let task = TaskSpan::start("build mod assemblies");
    let Some(solution) = find_solution(&context.build.base_dir)? else {
        task.warn("no solution found, skipping build");
        return Ok(None);
    };

    let info = &context.mod_info;
    let relative = solution
        .strip_prefix(&context.build.base_dir)
        .unwrap_or(&solution)
        .display()
        .to_string();

    if dry_run {
        task.success(format!("{relative} [{configuration}] (dry run)"));
        return Ok(Some(solution));
    }

    ProcessBuilder::which(&config.dotnet)?
        .name("dotnet")
        .args(build_args(&info.version, &info.author.name, configuration))
        .arg(solution.display().to_string())
        .cwd(&context.build.base_dir)
        .run()
        .await?;

    task.success(format!("{relative} [{configuration}]"));
    Ok(Some(solution))
}
