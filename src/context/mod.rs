// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project context: the mod being built and the game it targets.
//!
//! ```text
//! cwd ──find_up──> modinfo.json    ──> ModInfo   ┐
//!     ──find_up──> gameconfig.json ──> GameConfig├─> Context
//!                                                 │     build.base_dir   = dir(modinfo.json)
//!                                                 │     build.source_dir = base_dir/mod.sourceDir
//!                                                 ┘     build.target_dir = game.targetDir/mod.targetDir
//! ```

pub mod dependency;
pub mod types;


use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, ModError, ModResult, Result};

pub use types::{AuthorInfo, ChangelogEntry, Dependency, DependencyKind, GameConfig, ModInfo};

pub const MODINFO_FILE: &str = "modinfo.json";
pub const GAMECONFIG_FILE: &str = "gameconfig.json";

/// Paths derived from the two project files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// Folder containing `modinfo.json`; the git work tree.
    pub base_dir: PathBuf,
    /// .NET solution folder.
    pub source_dir: PathBuf,
    /// Install folder inside the game's mod folder.
    pub target_dir: PathBuf,
}

/// Everything a command needs to know about the current mod.
#[derive(Debug, Clone)]
pub struct Context {
    pub mod_info: ModInfo,
    pub game: GameConfig,
    pub build: BuildPaths,
    modinfo_path: PathBuf,
}

fn not_found(file: &str) -> ModError {
    ConfigError::NotFound(file.to_string()).into()
}

impl Context {
    /// Locate and load both project files, searching upwards from `start`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if either file is missing, or a parse
    /// error naming the file.
    pub fn discover(start: &Path) -> Result<Self> {
        let modinfo_path =
            find_up(MODINFO_FILE, start).ok_or_else(|| not_found(MODINFO_FILE))?;
        let gameconfig_path = find_up(GAMECONFIG_FILE, start)
            .ok_or_else(|| not_found(GAMECONFIG_FILE))?;
        debug!(
            modinfo = %modinfo_path.display(),
            gameconfig = %gameconfig_path.display(),
            "project files"
        );

        let mod_info: ModInfo = read_json(&modinfo_path)?;
        let game: GameConfig = read_json(&gameconfig_path)?;
        Ok(Self::new(mod_info, game, modinfo_path))
    }

    /// Assemble a context from already loaded files.
    #[must_use]
    pub fn new(mod_info: ModInfo, game: GameConfig, modinfo_path: PathBuf) -> Self {
        let base_dir = modinfo_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let build = BuildPaths {
            source_dir: base_dir.join(&mod_info.source_dir),
            target_dir: game.target_dir.join(&mod_info.target_dir),
            base_dir,
        };
        Self {
            mod_info,
            game,
            build,
            modinfo_path,
        }
    }

    #[must_use]
    pub fn modinfo_path(&self) -> &Path {
        &self.modinfo_path
    }

    /// Persist `mod_info` back to `modinfo.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_mod_info(&self) -> Result<()> {
        write_json(&self.modinfo_path, &self.mod_info)?;
        info!(path = %self.modinfo_path.display(), "write modinfo");
        Ok(())
    }
}

/// First `name` found in `start` or any of its ancestors.
#[must_use]
pub fn find_up(name: &str, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Read and deserialize a JSON file.
///
/// # Errors
///
/// Returns `ConfigError::ReadError` or `ConfigError::ParseError`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> ModResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| {
        ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Serialize to JSON with 4-space indentation and replace `path` atomically.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    buffer.push(b'\n');

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    temp.write_all(&buffer)
        .with_context(|| format!("failed to write {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

/// Write a project file that must not exist yet (or may be replaced when
/// `force` is set). Returns the path written.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the file exists and `force` is
/// false, or an I/O error.
pub fn create_json<T: Serialize>(dir: &Path, name: &str, value: &T, force: bool) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.exists() && !force {
        return Err(ModError::from(ConfigError::InvalidValue {
            section: name.to_string(),
            key: "path".to_string(),
            message: format!("{} already exists, use --force to overwrite", path.display()),
        })
        .into());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory {}", dir.display()))?;
    write_json(&path, value)?;
    info!(path = %path.display(), "write {name}");
    Ok(path)
}
