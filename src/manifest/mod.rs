// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod manifest (`About/About.xml`) model.
//!
//! ```text
//! About.xml (branch 1.0) --read--> Manifest { game_version: "1.0", .. }
//! About.xml (branch 1.1) --read--> Manifest { game_version: "1.1", .. }
//!                                      |
//!                              merge::consolidate
//!                                      v
//!                            ConsolidatedManifest
//!                                      |
//!                                  xml::write
//!                                      v
//!                              target/About/About.xml
//! ```
//!
//! Lists and strings that are empty are kept as `None`, so a missing
//! `<loadBefore>` and an empty `<loadBefore/>` compare equal.

pub mod generate;
pub mod xml;

pub use generate::{game_version, generate_manifest};
pub use xml::{read_manifest, render_manifest, write_manifest};

/// A required mod that must be loaded alongside this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModDependency {
    pub package_id: String,
    pub display_name: Option<String>,
    pub steam_workshop_url: Option<String>,
    pub download_url: Option<String>,
}

/// Metadata of one game-version snapshot of a mod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub author: String,
    pub package_id: String,
    pub url: Option<String>,
    pub supported_versions: Vec<String>,
    pub description: Option<String>,
    pub mod_dependencies: Option<Vec<ModDependency>>,
    pub incompatible_with: Option<Vec<String>>,
    pub load_before: Option<Vec<String>>,
    pub load_after: Option<Vec<String>>,
    /// Branch the snapshot was read from. Never written to XML.
    pub game_version: Option<String>,
}

impl Manifest {
    /// Tag the snapshot with the game version it was captured under.
    #[must_use]
    pub fn with_game_version(mut self, version: impl Into<String>) -> Self {
        self.game_version = Some(version.into());
        self
    }
}

/// Build a RimWorld package id: `<author>.<mod>` with everything that is not
/// an ASCII letter or a dot removed.
#[must_use]
pub fn package_id(author: &str, mod_name: &str) -> String {
    format!("{author}.{mod_name}")
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '.')
        .collect()
}

/// A manifest field after merging all snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consolidated<T> {
    /// Every snapshot agrees. `None` means every snapshot lacks the field.
    Shared(Option<T>),
    /// Snapshots disagree: one entry per walked version, in walk order.
    ByVersion(Vec<(String, Option<T>)>),
}

impl<T> Default for Consolidated<T> {
    fn default() -> Self {
        Self::Shared(None)
    }
}

impl<T> Consolidated<T> {
    #[must_use]
    pub const fn is_by_version(&self) -> bool {
        matches!(self, Self::ByVersion(_))
    }

    /// The shared value, if the field was hoisted.
    #[must_use]
    pub const fn shared(&self) -> Option<&T> {
        match self {
            Self::Shared(value) => value.as_ref(),
            Self::ByVersion(_) => None,
        }
    }
}

/// Single manifest describing every supported game version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedManifest {
    pub name: String,
    pub author: String,
    pub package_id: String,
    pub url: Option<String>,
    pub supported_versions: Vec<String>,
    pub description: Consolidated<String>,
    /// Plain `<description>` written next to `descriptionsByVersion` for
    /// game versions that do not read the map.
    pub default_description: Option<String>,
    pub mod_dependencies: Consolidated<Vec<ModDependency>>,
    pub incompatible_with: Consolidated<Vec<String>>,
    pub load_before: Consolidated<Vec<String>>,
    pub load_after: Consolidated<Vec<String>>,
}

impl From<Manifest> for ConsolidatedManifest {
    fn from(manifest: Manifest) -> Self {
        Self {
            name: manifest.name,
            author: manifest.author,
            package_id: manifest.package_id,
            url: manifest.url,
            supported_versions: manifest.supported_versions,
            description: Consolidated::Shared(manifest.description),
            default_description: None,
            mod_dependencies: Consolidated::Shared(manifest.mod_dependencies),
            incompatible_with: Consolidated::Shared(manifest.incompatible_with),
            load_before: Consolidated::Shared(manifest.load_before),
            load_after: Consolidated::Shared(manifest.load_after),
        }
    }
}
