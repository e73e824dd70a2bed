// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Editing the dependency list of `modinfo.json`.

use crate::error::{ConfigError, ModResult};

use super::types::{Dependency, ModInfo};

fn invalid(id: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: "dependencies".to_string(),
        key: id.to_string(),
        message,
    }
}

/// Append a dependency. The same id may appear once per version.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if an entry with the same id and
/// version exists, or a required dependency has no display name.
pub fn add_dependency(mod_info: &mut ModInfo, dependency: Dependency) -> ModResult<()> {
    if dependency.id.trim().is_empty() {
        return Err(invalid(&dependency.id, "dependency id must not be empty".to_string()).into());
    }
    if dependency.kind == super::DependencyKind::Required && dependency.name.is_none() {
        return Err(invalid(
            &dependency.id,
            "required dependencies need a display name".to_string(),
        )
        .into());
    }
    if mod_info
        .dependencies
        .iter()
        .any(|d| d.id == dependency.id && d.version == dependency.version)
    {
        return Err(invalid(
            &dependency.id,
            format!(
                "mod already contains a dependency on '{}', version '{}'",
                dependency.id,
                dependency.version.as_deref().unwrap_or("any")
            ),
        )
        .into());
    }
    mod_info.dependencies.push(dependency);
    Ok(())
}

/// Remove the dependency with `id` (and `version`, when several versions of
/// the same id are listed). Returns the removed entry.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when nothing matches or the match is
/// ambiguous.
pub fn remove_dependency(
    mod_info: &mut ModInfo,
    id: &str,
    version: Option<&str>,
) -> ModResult<Dependency> {
    let matches: Vec<usize> = mod_info
        .dependencies
        .iter()
        .enumerate()
        .filter(|(_, d)| d.id == id && version.is_none_or(|v| d.version.as_deref() == Some(v)))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Err(invalid(id, format!("no dependency on '{id}' found")).into()),
        [index] => Ok(mod_info.dependencies.remove(*index)),
        _ => Err(invalid(
            id,
            format!(
                "{} dependencies on '{id}' found, pass a version to pick one",
                matches.len()
            ),
        )
        .into()),
    }
}
