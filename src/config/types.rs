// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for modbuild-rs.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, MergeConfig, BuildConfig
//! MergeConfig.rules: [{ versions = ">=1.1", folders = [..] }, ..]
//! ```
//!
//! # Build Configuration
//!
//! ```text
//! BuildConfiguration: Debug (default) | Release
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// .NET build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BuildConfiguration {
    #[default]
    Debug,
    Release,
}

impl std::fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Release => write!(f, "Release"),
        }
    }
}

impl std::str::FromStr for BuildConfiguration {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(ConfigError::InvalidValue {
                section: "build".to_string(),
                key: "configuration".to_string(),
                message: format!("expected 'Debug' or 'Release', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would be done without touching files or git.
    pub dry: bool,
    /// Extra diagnostics (unversioned files during merge).
    pub debug: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            debug: false,
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
            log_file: None,
        }
    }
}

/// One row of the version-folder table: for game versions in `versions`,
/// files under any of `folders` are version specific.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolderRule {
    /// Semver requirement, e.g. `=1.0` or `>=1.1`.
    pub versions: String,
    /// Top-level folder names.
    pub folders: Vec<String>,
}

impl FolderRule {
    #[must_use]
    pub fn new(versions: &str, folders: &[&str]) -> Self {
        Self {
            versions: versions.to_string(),
            folders: folders.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Multi-version merge options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Manifest location inside each branch.
    pub manifest: String,
    /// Versions whose shared-root files are reported as unversioned and
    /// which get a `LoadFolders.xml` entry.
    pub versioned: String,
    /// Ordered classification table; first matching rule wins.
    pub rules: Vec<FolderRule>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            manifest: "About/About.xml".to_string(),
            versioned: ">=1.1".to_string(),
            rules: vec![
                FolderRule::new("=1.0", &["Assemblies", "Defs", "Patches"]),
                FolderRule::new(
                    ">=1.1",
                    &[
                        "Assemblies",
                        "Defs",
                        "Patches",
                        "Sounds",
                        "Textures",
                        "Languages",
                    ],
                ),
            ],
        }
    }
}

/// .NET build options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// `dotnet` executable name or path.
    pub dotnet: PathBuf,
    /// Configuration for non-release builds.
    pub configuration: BuildConfiguration,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            dotnet: PathBuf::from("dotnet"),
            configuration: BuildConfiguration::Debug,
        }
    }
}
