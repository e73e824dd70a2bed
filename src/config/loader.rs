// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered loading of `mod.toml`.
//!
//! ```text
//! ConfigLoader::layered(inis, overrides)
//!   = new()
//!       .add_toml_file_optional("mod.toml")   [project]
//!       .add_toml_file(ini) ...               [ini]
//!       .with_env_prefix("MOD")               MOD_SECTION__KEY
//!       .apply_overrides(--set, flags)        section/key=value
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::{CONFIG_FILE, Config, ENV_PREFIX};
use crate::error::{ConfigError, ModError, Result};

/// A TOML source that contributed to the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `mod.toml` found in the working directory.
    Project(PathBuf),
    /// File passed with `--ini`.
    Ini(PathBuf),
    /// TOML text given directly.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(path) => write!(f, "[project] {}", path.display()),
            Self::Ini(path) => write!(f, "[ini] {}", path.display()),
            Self::Inline => write!(f, "[inline]"),
        }
    }
}

/// Builder for loading configuration from multiple sources. Later sources
/// win; overrides win over everything.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// The loader used by the `mod` binary: `mod.toml`, then every `--ini`
    /// file, then `MOD_*` variables, then `overrides`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed override.
    pub fn layered<P, S>(inis: &[P], overrides: &[S]) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        inis.iter()
            .fold(Self::new().add_toml_file_optional(CONFIG_FILE), |loader, ini| {
                loader.add_toml_file(ini)
            })
            .with_env_prefix(ENV_PREFIX)
            .apply_overrides(overrides)
    }

    /// Add a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.sources.push(ConfigSource::Ini(path.to_path_buf()));
        self
    }

    /// Add a TOML file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.is_file() {
            self.sources.push(ConfigSource::Project(path.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` environment variables, e.g.
    /// `MOD_GLOBAL__OUTPUT_LOG_LEVEL=4`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Set one dotted key, e.g. `global.dry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid configuration path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Apply `section/key=value` overrides (the `--set` syntax).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an entry without `=` or `/`.
    pub fn apply_overrides<S: AsRef<str>>(self, overrides: &[S]) -> Result<Self> {
        overrides.iter().try_fold(self, |loader, entry| {
            let (key, value) = parse_override(entry.as_ref()).map_err(ModError::from)?;
            loader.set(&key, value)
        })
    }

    /// Merge every source into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing or malformed, a value
    /// has the wrong type or an unknown key, or a merge rule has an invalid
    /// version range.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source list for `mod inis`.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `global/debug=true` into `("global.debug", "true")`.
fn parse_override(entry: &str) -> std::result::Result<(String, String), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        section: "cli".to_string(),
        key: "set".to_string(),
        message: format!("expected 'section/key=value', got '{entry}'"),
    };
    let (key, value) = entry.split_once('=').ok_or_else(invalid)?;
    let (section, name) = key.trim().split_once('/').ok_or_else(invalid)?;
    if section.is_empty() || name.is_empty() {
        return Err(invalid());
    }
    Ok((format!("{section}.{name}"), value.trim().to_string()))
}
