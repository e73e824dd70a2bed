// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, ModResult, Result};
use anyhow::Context;
use std::path::Path;
use tokio::fs;

use super::walk::{PathFilter, WalkOptions, collect_files};

/// Copies a single file, creating the destination's parent directories.
///
/// # Errors
///
/// Returns `FsError::CopyFailed` naming both paths and the cause.
pub async fn copy_file(from: &Path, to: &Path) -> ModResult<()> {
    let fail = |source: std::io::Error| FsError::CopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source,
    };
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).await.map_err(fail)?;
    }
    fs::copy(from, to).await.map_err(fail)?;
    Ok(())
}

/// Removes a directory and everything below it. A missing directory is not
/// an error.
///
/// # Errors
///
/// Returns `FsError::IoError` if the directory exists but cannot be removed.
pub async fn clear_directory(path: &Path) -> ModResult<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(FsError::IoError {
            path: path.display().to_string(),
            source,
        }
        .into()),
    }
}

/// Recursively copies `src` into `dst`, skipping hidden entries and
/// anything matched by `exclude`. Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if `src` does not exist or a copy fails.
///
/// # Example
/// ```no_run
/// use modbuild_rs::utility::fs::copy::copy_directory;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let exclude = vec!["*.pdb".to_string(), "Source".to_string()];
/// copy_directory(Path::new("mod"), Path::new("out/mod"), &exclude).await?;
/// # Ok(())
/// # }
/// ```
pub async fn copy_directory(src: &Path, dst: &Path, exclude: &[String]) -> Result<usize> {
    let filter = PathFilter::new(&[], exclude)?;
    let files = collect_files(src, &WalkOptions::for_mod_tree(), &filter)
        .with_context(|| format!("failed to list {}", src.display()))?
        .into_complete_files(src)?;

    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    for relative in &files {
        copy_file(&src.join(relative), &dst.join(relative)).await?;
    }
    Ok(files.len())
}
