// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `modinfo.json` and `gameconfig.json` shapes.
//!
//! Fields this tool does not use are kept in `extra` and written back
//! untouched.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

use crate::version::ModVersion;

/// How a dependency relates to this mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    Required,
    Incompatible,
    LoadBefore,
    LoadAfter,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Incompatible => write!(f, "incompatible"),
            Self::LoadBefore => write!(f, "loadBefore"),
            Self::LoadAfter => write!(f, "loadAfter"),
        }
    }
}

/// A dependency entry of `modinfo.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Package id of the other mod.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.kind)?;
        if let Some(name) = &self.name {
            write!(f, " \"{name}\"")?;
        }
        if let Some(version) = &self.version {
            write!(f, " v{version}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One commit listed in the mod's changelog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub date: DateTime<FixedOffset>,
    pub message: String,
    pub author: AuthorInfo,
    pub hash: String,
    /// Release the commit first shipped in, once a tag contains it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ModVersion>,
}

/// Contents of `modinfo.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub version: ModVersion,
    #[serde(default)]
    pub author: AuthorInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Solution folder, relative to the mod folder.
    #[serde(default)]
    pub source_dir: String,
    /// Install folder name below the game's mod folder.
    #[serde(default)]
    pub target_dir: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    /// Newest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangelogEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModInfo {
    /// Fresh `modinfo.json` for `mod config mod`.
    #[must_use]
    pub fn scaffold(name: &str, author: &str) -> Self {
        let folder: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        Self {
            name: name.to_string(),
            version: ModVersion::new(0, 1, 0),
            author: AuthorInfo {
                name: author.to_string(),
                ..AuthorInfo::default()
            },
            source_dir: "Source".to_string(),
            target_dir: folder,
            ..Self::default()
        }
    }

    /// Dependencies of one kind, in file order.
    pub fn dependencies_of(&self, kind: DependencyKind) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(move |d| d.kind == kind)
    }
}

/// Contents of `gameconfig.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The game's mod folder.
    pub target_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<u64>,
    /// Globs of files that go into a release.
    #[serde(default)]
    pub include: Vec<String>,
    /// Globs of files kept out of a release.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameConfig {
    /// Fresh `gameconfig.json` for `mod config game`.
    #[must_use]
    pub fn scaffold(name: &str, target_dir: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            target_dir,
            include: vec![
                "About/**".to_string(),
                "Assemblies/**".to_string(),
                "Defs/**".to_string(),
                "Languages/**".to_string(),
                "Patches/**".to_string(),
                "Sounds/**".to_string(),
                "Textures/**".to_string(),
                "LoadFolders.xml".to_string(),
            ],
            exclude: vec!["*.pdb".to_string(), "Source".to_string()],
            ..Self::default()
        }
    }
}
