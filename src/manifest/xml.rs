// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `About.xml` reading and writing.
//!
//! Reading goes through serde (`quick_xml::de`); writing uses the event
//! writer so element order and indentation are fixed:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <ModMetaData>
//!     <name>..</name>
//!     <supportedVersions>
//!         <li>1.0</li>
//!     </supportedVersions>
//!     <loadBeforeByVersion>
//!         <v1.0/>
//!         <v1.1>
//!             <li>Other.Mod</li>
//!         </v1.1>
//!     </loadBeforeByVersion>
//! </ModMetaData>
//! ```

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;
use std::fmt::Display;
use std::path::Path;

use super::{Consolidated, ConsolidatedManifest, Manifest, ModDependency};
use crate::error::{ManifestError, ModResult};

#[derive(Debug, Default, Deserialize)]
struct List<T> {
    #[serde(default)]
    li: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependency {
    #[serde(default)]
    package_id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    steam_workshop_url: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    package_id: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    supported_versions: Option<List<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    mod_dependencies: Option<List<RawDependency>>,
    #[serde(default)]
    incompatible_with: Option<List<String>>,
    #[serde(default)]
    load_before: Option<List<String>>,
    #[serde(default)]
    load_after: Option<List<String>>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn strings(list: Option<List<String>>) -> Vec<String> {
    list.map(|l| l.li)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| non_empty(Some(s)))
        .collect()
}

fn non_empty_list<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

impl From<RawManifest> for Manifest {
    fn from(raw: RawManifest) -> Self {
        let dependencies = raw
            .mod_dependencies
            .map(|l| l.li)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|d| {
                Some(ModDependency {
                    package_id: non_empty(d.package_id)?,
                    display_name: non_empty(d.display_name),
                    steam_workshop_url: non_empty(d.steam_workshop_url),
                    download_url: non_empty(d.download_url),
                })
            })
            .collect();

        Self {
            name: non_empty(raw.name).unwrap_or_default(),
            author: non_empty(raw.author).unwrap_or_default(),
            package_id: non_empty(raw.package_id).unwrap_or_default(),
            url: non_empty(raw.url),
            supported_versions: strings(raw.supported_versions),
            description: non_empty(raw.description),
            mod_dependencies: non_empty_list(dependencies),
            incompatible_with: non_empty_list(strings(raw.incompatible_with)),
            load_before: non_empty_list(strings(raw.load_before)),
            load_after: non_empty_list(strings(raw.load_after)),
            game_version: None,
        }
    }
}

/// Parse an `About.xml` document.
///
/// `source_name` only labels errors (a path or `branch:path`).
///
/// # Errors
///
/// Returns `ManifestError::Parse` if the document is not well-formed or has
/// the wrong shape.
pub fn read_manifest(xml: &str, source_name: &str) -> ModResult<Manifest> {
    let raw: RawManifest =
        quick_xml::de::from_str(xml).map_err(|e| ManifestError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    Ok(raw.into())
}

/// Thin wrapper over the event writer that maps failures to
/// [`ManifestError::Write`].
struct XmlOut {
    writer: Writer<Vec<u8>>,
    path: String,
}

impl XmlOut {
    fn new(path: &str) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 4),
            path: path.to_string(),
        }
    }

    fn fail(&self, e: impl Display) -> ManifestError {
        ManifestError::Write {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    fn event(&mut self, event: Event<'_>) -> ModResult<()> {
        match self.writer.write_event(event) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e).into()),
        }
    }

    fn declaration(&mut self) -> ModResult<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
    }

    fn start(&mut self, name: &str) -> ModResult<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> ModResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str) -> ModResult<()> {
        self.event(Event::Empty(BytesStart::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> ModResult<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn optional(&mut self, name: &str, text: Option<&str>) -> ModResult<()> {
        match text {
            Some(text) => self.text_element(name, text),
            None => Ok(()),
        }
    }

    fn string_list(&mut self, name: &str, items: &[String]) -> ModResult<()> {
        if items.is_empty() {
            return self.empty(name);
        }
        self.start(name)?;
        for item in items {
            self.text_element("li", item)?;
        }
        self.end(name)
    }

    fn dependency_list(&mut self, name: &str, items: &[ModDependency]) -> ModResult<()> {
        if items.is_empty() {
            return self.empty(name);
        }
        self.start(name)?;
        for dep in items {
            self.start("li")?;
            self.text_element("packageId", &dep.package_id)?;
            self.optional("displayName", dep.display_name.as_deref())?;
            self.optional("steamWorkshopUrl", dep.steam_workshop_url.as_deref())?;
            self.optional("downloadUrl", dep.download_url.as_deref())?;
            self.end("li")?;
        }
        self.end(name)
    }

    /// Write a consolidated field: the shared element when hoisted, else a
    /// `<{by_version}>` map with one (possibly empty) child per version.
    fn consolidated<T>(
        &mut self,
        name: &str,
        by_version: &str,
        field: &Consolidated<T>,
        write: impl Fn(&mut Self, &str, &T) -> ModResult<()>,
    ) -> ModResult<()> {
        match field {
            Consolidated::Shared(None) => Ok(()),
            Consolidated::Shared(Some(value)) => write(self, name, value),
            Consolidated::ByVersion(entries) => {
                self.start(by_version)?;
                for (version, value) in entries {
                    let key = format!("v{version}");
                    match value {
                        Some(value) => write(self, &key, value)?,
                        None => self.empty(&key)?,
                    }
                }
                self.end(by_version)
            }
        }
    }

    fn finish(self) -> ModResult<String> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| {
            ManifestError::Write {
                path: self.path,
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// Render a consolidated manifest as an `About.xml` document.
///
/// # Errors
///
/// Returns `ManifestError::Write` if the XML writer fails.
pub fn render_manifest(manifest: &ConsolidatedManifest, path: &str) -> ModResult<String> {
    let mut out = XmlOut::new(path);
    out.declaration()?;
    out.start("ModMetaData")?;
    out.text_element("name", &manifest.name)?;
    out.text_element("author", &manifest.author)?;
    out.text_element("packageId", &manifest.package_id)?;
    out.optional("url", manifest.url.as_deref())?;
    out.string_list("supportedVersions", &manifest.supported_versions)?;
    if manifest.description.is_by_version() {
        out.optional("description", manifest.default_description.as_deref())?;
    }
    out.consolidated(
        "description",
        "descriptionsByVersion",
        &manifest.description,
        |out, name, text| out.text_element(name, text),
    )?;
    out.consolidated(
        "modDependencies",
        "modDependenciesByVersion",
        &manifest.mod_dependencies,
        |out, name, deps| out.dependency_list(name, deps),
    )?;
    for (name, by_version, field) in [
        (
            "incompatibleWith",
            "incompatibleWithByVersion",
            &manifest.incompatible_with,
        ),
        ("loadBefore", "loadBeforeByVersion", &manifest.load_before),
        ("loadAfter", "loadAfterByVersion", &manifest.load_after),
    ] {
        out.consolidated(name, by_version, field, |out, name, ids| {
            out.string_list(name, ids)
        })?;
    }
    out.end("ModMetaData")?;
    out.finish()
}

/// Render `LoadFolders.xml` mapping every version to its own subfolder.
///
/// # Errors
///
/// Returns `ManifestError::Write` if the XML writer fails.
pub fn render_load_folders(versions: &[String], path: &str) -> ModResult<String> {
    let mut out = XmlOut::new(path);
    out.declaration()?;
    if versions.is_empty() {
        out.empty("loadFolders")?;
        return out.finish();
    }
    out.start("loadFolders")?;
    for version in versions {
        out.string_list(&format!("v{version}"), std::slice::from_ref(version))?;
    }
    out.end("loadFolders")?;
    out.finish()
}

/// Render and write a manifest to `path`, creating parent directories.
///
/// # Errors
///
/// Returns `ManifestError::Write` if rendering or writing fails.
pub async fn write_manifest(manifest: &ConsolidatedManifest, path: &Path) -> ModResult<()> {
    let display = path.display().to_string();
    let xml = render_manifest(manifest, &display)?;
    write_document(path, &xml).await
}

/// Write an XML document, creating parent directories.
///
/// # Errors
///
/// Returns `ManifestError::Write` if the directory or file cannot be written.
pub async fn write_document(path: &Path, xml: &str) -> ModResult<()> {
    let fail = |e: std::io::Error| ManifestError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(fail)?;
    }
    tokio::fs::write(path, xml).await.map_err(fail)?;
    Ok(())
}
