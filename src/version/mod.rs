// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod version numbers.
//!
//! ```text
//! "1.4.12"  --> ModVersion { major: 1, minor: 4, build: 12 }
//! "v2.x"    --> ModVersion { major: 2, minor: 0, build: 0 }
//!
//! bump(Build) 1.4.12 --> 1.4.13
//! bump(Minor) 1.4.12 --> 1.5.12
//! bump(Major) 1.4.12 --> 2.0.12
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-part mod version as stored in `modinfo.json`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct ModVersion {
    pub major: u64,
    pub minor: u64,
    pub build: u64,
}

/// Which part of a [`ModVersion`] to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VersionPart {
    #[default]
    Build,
    Minor,
    Major,
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => write!(f, "build"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

impl ModVersion {
    #[must_use]
    pub const fn new(major: u64, minor: u64, build: u64) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }

    /// Lenient parse: non-digit characters are dropped from every part and
    /// missing or empty parts become 0. Never fails.
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        let mut parts = text.trim().split('.').map(|part| {
            let digits: String = part.chars().filter(char::is_ascii_digit).collect();
            digits.parse::<u64>().unwrap_or(0)
        });
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            build: parts.next().unwrap_or(0),
        }
    }

    /// Increment one part of the version.
    ///
    /// A major bump resets the minor part; the build number keeps counting.
    #[must_use]
    pub const fn bump(self, part: VersionPart) -> Self {
        match part {
            VersionPart::Build => Self {
                build: self.build + 1,
                ..self
            },
            VersionPart::Minor => Self {
                minor: self.minor + 1,
                ..self
            },
            VersionPart::Major => Self {
                major: self.major + 1,
                minor: 0,
                ..self
            },
        }
    }

    /// Replace the parts that are `Some`.
    #[must_use]
    pub fn with_parts(self, major: Option<u64>, minor: Option<u64>, build: Option<u64>) -> Self {
        Self {
            major: major.unwrap_or(self.major),
            minor: minor.unwrap_or(self.minor),
            build: build.unwrap_or(self.build),
        }
    }

    /// `major.minor`, the form RimWorld uses for supported versions.
    #[must_use]
    pub fn short(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Assembly version used for .NET builds (`major.0.0`), stable across
    /// minor releases so dependent mods keep binding.
    #[must_use]
    pub fn assembly_version(&self) -> String {
        format!("{}.0.0", self.major)
    }
}

impl fmt::Display for ModVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

impl FromStr for ModVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}
