// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, ModError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::walk::{PathFilter, WalkOptions, collect_files};

/// Size of a written archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub files: usize,
    pub bytes: u64,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ModError + '_ {
    move |source| {
        FsError::IoError {
            path: path.display().to_string(),
            source,
        }
        .into()
    }
}

fn zip_error(path: &Path) -> impl FnOnce(zip::result::ZipError) -> ModError + '_ {
    move |e| {
        FsError::Archive {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    }
}

/// `<folder>/<relative>` with `/` separators.
fn entry_name(folder: &str, relative: &Path) -> String {
    std::iter::once(folder.to_string())
        .chain(relative.components().filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        }))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Zips every file below `src` into `archive`, uncompressed, inside a top
/// folder named like `src`. Parent folders of `archive` are created.
///
/// # Errors
///
/// Returns `FsError::WalkIncomplete` if `src` cannot be fully listed, or an
/// `FsError` if a file cannot be read or the archive cannot be written.
pub fn create_archive(src: &Path, archive: &Path) -> Result<ArchiveSummary> {
    let files = collect_files(src, &WalkOptions::for_mod_tree(), &PathFilter::default())?
        .into_complete_files(src)?;
    let folder = src
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(parent) = archive.parent() {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let out = File::create(archive).map_err(io_error(archive))?;
    let mut writer = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for relative in &files {
        let path = src.join(relative);
        writer
            .start_file(entry_name(&folder, relative), options)
            .map_err(zip_error(archive))?;
        let mut input = File::open(&path).map_err(io_error(&path))?;
        std::io::copy(&mut input, &mut writer).map_err(io_error(&path))?;
    }
    writer
        .finish()
        .map_err(zip_error(archive))?
        .flush()
        .map_err(io_error(archive))?;

    let bytes = std::fs::metadata(archive).map_err(io_error(archive))?.len();
    Ok(ArchiveSummary {
        files: files.len(),
        bytes,
    })
}
