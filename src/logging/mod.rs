// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Console and file logging on top of `tracing`.
//!
//! ```text
//! output_log_level --> stderr layer (no timestamps, ANSI)
//! file_log_level   --> log_file layer (non_blocking, targets)   [optional]
//!
//! level  0 Silent  1 Error  2 Warn  3 Info  4 Debug  5 Trace  6 Dump
//!        1..=5 only raise this crate; 6 lets gix and the rest through
//! ```

mod task;

pub use task::TaskSpan;

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ConfigError, Result};

/// Targets that follow the configured level below `Dump`.
const OWN_TARGETS: [&str; 2] = ["modbuild_rs", "mod"];

/// Verbosity of one log sink, written as `0..=6` in `mod.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum LogLevel {
    Silent = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
    Dump = 6,
}

impl LogLevel {
    const ALL: [Self; 7] = [
        Self::Silent,
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
        Self::Dump,
    ];

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for anything above 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(level).ok_or_else(|| ConfigError::InvalidValue {
            section: "global".to_string(),
            key: "log_level".to_string(),
            message: format!("log level must be 0-6, got {level}"),
        })
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_u8(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level)).copied()
    }

    /// `EnvFilter` directives for this level.
    #[must_use]
    pub fn directives(self) -> String {
        let (others, own) = match self {
            Self::Silent => return "off".to_string(),
            Self::Error => return "error".to_string(),
            Self::Dump => return "trace".to_string(),
            Self::Warn => ("warn", "warn"),
            Self::Info => ("warn", "info"),
            Self::Debug => ("warn", "debug"),
            Self::Trace => ("info", "trace"),
        };
        OWN_TARGETS
            .iter()
            .fold(others.to_string(), |acc, target| format!("{acc},{target}={own}"))
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Self::new(u8::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// Sinks and levels handed to [`init_logging`].
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::Trace)]
    file_level: LogLevel,
    #[builder(setters(name = with_log_file), into)]
    log_file: Option<PathBuf>,
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Flushes the file sink when dropped. Keep it alive in `main`.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created.
///
/// ```no_run
/// use modbuild_rs::logging::{init_logging, LogConfig, LogLevel};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::Debug)
///     .with_log_file("logs/mod.log")
///     .build();
/// let _guard = init_logging(&config).expect("logging");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(config.console_level.filter());

    let (file, file_guard) = match config.log_file() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(create_log_file(path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(config.file_level.filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Truncate or create `path`, creating missing parent directories.
fn create_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create log file {}", path.display()))
}

#[cfg(test)]
mod tests;
