// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool configuration (`mod.toml`).
//!
//! Project data (`modinfo.json`, `gameconfig.json`) lives in
//! [`crate::context`]; this module only covers how the tool behaves.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local mod.toml (cwd)
//! 3. --ini files
//! 4. MOD_* env vars
//! 5. --set / CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MOD_GLOBAL__DRY=true            → global.dry = true
//! MOD_GLOBAL__OUTPUT_LOG_LEVEL=4  → global.output_log_level = 4
//! MOD_MERGE__VERSIONED=>=1.2      → merge.versioned = ">=1.2"
//! ```
//!
//! # Classification Rules
//!
//! ```toml
//! [[merge.rules]]
//! versions = "=1.0"
//! folders = ["Assemblies", "Defs", "Patches"]
//!
//! [[merge.rules]]
//! versions = ">=1.1"
//! folders = ["Assemblies", "Defs", "Patches", "Sounds", "Textures", "Languages"]
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ModResult, Result};
use crate::merge::classify::parse_range;

use loader::ConfigLoader;
use types::{BuildConfig, GlobalConfig, MergeConfig};

/// Name of the per-directory configuration file.
pub const CONFIG_FILE: &str = "mod.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "MOD";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Multi-version merge.
    pub merge: MergeConfig,
    /// .NET build.
    pub build: BuildConfig,
}

impl Config {
    /// Parse a single `mod.toml` document, without files or environment.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML, unknown keys or bad version ranges.
    pub fn parse(content: &str) -> Result<Self> {
        ConfigLoader::new().add_toml_str(content).build()
    }

    /// Every version range in `[merge]` must parse as a semver requirement
    /// with explicit operators.
    ///
    /// # Errors
    ///
    /// Returns `MergeError::InvalidRule` for the first invalid range.
    pub fn validate(&self) -> ModResult<()> {
        let ranges = std::iter::once(&self.merge.versioned)
            .chain(self.merge.rules.iter().map(|rule| &rule.versions));
        for range in ranges {
            parse_range(range)?;
        }
        Ok(())
    }

    /// Effective settings as aligned `key = value` lines, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let global = &self.global;
        let mut options: BTreeMap<String, String> = [
            ("global.dry", global.dry.to_string()),
            ("global.debug", global.debug.to_string()),
            ("global.output_log_level", global.output_log_level.as_u8().to_string()),
            ("global.file_log_level", global.file_log_level.as_u8().to_string()),
            (
                "global.log_file",
                global
                    .log_file
                    .as_ref()
                    .map_or_else(String::new, |p| p.display().to_string()),
            ),
            ("merge.manifest", self.merge.manifest.clone()),
            ("merge.versioned", self.merge.versioned.clone()),
            ("build.dotnet", self.build.dotnet.display().to_string()),
            ("build.configuration", self.build.configuration.to_string()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        options.extend(self.merge.rules.iter().enumerate().map(|(i, rule)| {
            (
                format!("merge.rules.{i}"),
                format!("{} -> {}", rule.versions, rule.folders.join(", ")),
            )
        }));

        let width = options.keys().map(String::len).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}
