// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, ModResult, Result, bail_out};
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::ScopedJoinHandle;
use tracing::warn;
use wax::{Glob, Program};

/// Directories a walk never enters. Hidden entries (`.git`, `.vs`) are
/// always skipped and ignore files are never read, since release trees
/// often ship ignored build output.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    skip_dirs: &'static [&'static str],
}

impl WalkOptions {
    /// A mod working tree.
    #[must_use]
    pub const fn for_mod_tree() -> Self {
        Self { skip_dirs: &[] }
    }

    /// Source files below a mod folder, without build output or packages.
    #[must_use]
    pub const fn for_project_scan() -> Self {
        Self {
            skip_dirs: &["obj", "bin", "packages", "node_modules"],
        }
    }

    #[must_use]
    pub const fn skip_dirs(&self) -> &'static [&'static str] {
        self.skip_dirs
    }
}

/// Include/exclude glob filter for paths relative to a walk root.
///
/// A pattern containing `/` is matched against the whole relative path,
/// anything else is matched against each path component on its own, so
/// `*.pdb` excludes every `.pdb` file and `Source` excludes a `Source`
/// folder at any depth.
#[derive(Debug, Default)]
pub struct PathFilter<'a> {
    include: Vec<Pattern<'a>>,
    exclude: Vec<Pattern<'a>>,
}

#[derive(Debug)]
struct Pattern<'a> {
    glob: Glob<'a>,
    anchored: bool,
}

impl<'a> Pattern<'a> {
    fn new(pattern: &'a str) -> ModResult<Self> {
        let glob = Glob::new(pattern).map_err(|e| {
            crate::error::ConfigError::InvalidValue {
                section: "game".to_string(),
                key: "include/exclude".to_string(),
                message: format!("invalid glob pattern '{pattern}': {e}"),
            }
        })?;
        Ok(Self {
            glob,
            anchored: pattern.contains('/'),
        })
    }

    fn is_match(&self, relative: &Path) -> bool {
        if self.anchored {
            return self.glob.is_match(relative);
        }
        relative.components().any(|component| match component {
            Component::Normal(name) => self.glob.is_match(Path::new(name)),
            _ => false,
        })
    }
}

impl<'a> PathFilter<'a> {
    /// Compile include and exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an unparsable pattern.
    pub fn new(include: &'a [String], exclude: &'a [String]) -> ModResult<Self> {
        let compile = |patterns: &'a [String]| {
            patterns
                .iter()
                .map(|p| Pattern::new(p))
                .collect::<ModResult<Vec<_>>>()
        };
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether a file participates: no include list or any include matches,
    /// and no exclude matches.
    #[must_use]
    pub fn accepts(&self, relative: &Path) -> bool {
        (self.include.is_empty() || self.include.iter().any(|p| p.is_match(relative)))
            && !self.is_excluded(relative)
    }

    #[must_use]
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|p| p.is_match(relative))
    }
}

/// Result of a parallel walk operation.
#[derive(Debug)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    error_count: usize,
}

impl WalkResult {
    /// Returns the files found during traversal, sorted.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }

    /// Returns the number of errors encountered.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    /// The files, only if every entry below `root` was read.
    ///
    /// # Errors
    ///
    /// Returns `FsError::WalkIncomplete` if the walk reported errors.
    pub fn into_complete_files(self, root: &Path) -> ModResult<Vec<PathBuf>> {
        if self.error_count > 0 {
            return Err(FsError::WalkIncomplete {
                path: root.display().to_string(),
                errors: self.error_count,
            }
            .into());
        }
        Ok(self.files)
    }

    #[cfg(test)]
    pub(super) const fn with_errors(files: Vec<PathBuf>, error_count: usize) -> Self {
        Self { files, error_count }
    }
}

/// Wait for the collector thread, turning a panic into an error.
pub(super) fn join_collector(
    handle: ScopedJoinHandle<'_, Vec<PathBuf>>,
) -> ModResult<Vec<PathBuf>> {
    handle
        .join()
        .map_err(|_| bail_out("file collector thread panicked"))
}

fn build_walker(root: &Path, options: WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .follow_links(false)
        .hidden(true)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false);

    let skip_dirs = options.skip_dirs();
    if !skip_dirs.is_empty() {
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.file_name().to_str().is_some_and(|name| skip_dirs.contains(&name)))
        });
    }
    builder
}

/// Parallel traversal with `ignore::WalkParallel`, returning files relative
/// to `root` that pass `filter`, sorted so callers see a stable order.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
pub fn collect_files(
    root: &Path,
    options: &WalkOptions,
    filter: &PathFilter<'_>,
) -> Result<WalkResult> {
    if !root.is_dir() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    // Bounded so huge trees cannot exhaust memory
    let (file_tx, file_rx) = bounded::<PathBuf>(1000);
    let error_count = Arc::new(AtomicUsize::new(0));

    let parallel = build_walker(root, *options).build_parallel();

    std::thread::scope(|scope| -> Result<WalkResult> {
        // Drain concurrently; the walk blocks once the channel is full.
        let collector = scope.spawn(|| file_rx.iter().collect::<Vec<_>>());

        parallel.run(|| {
            let file_tx = file_tx.clone();
            let error_count = Arc::clone(&error_count);

            Box::new(move |entry_result| {
                match entry_result {
                    Ok(entry) => {
                        let Ok(relative) = entry.path().strip_prefix(root) else {
                            return ignore::WalkState::Continue;
                        };
                        if relative.as_os_str().is_empty() {
                            return ignore::WalkState::Continue;
                        }
                        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                        if is_dir && filter.is_excluded(relative) {
                            return ignore::WalkState::Skip;
                        }
                        if entry.file_type().is_some_and(|ft| ft.is_file())
                            && filter.accepts(relative)
                        {
                            let _ = file_tx.send(relative.to_path_buf());
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "walk error");
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
                ignore::WalkState::Continue
            })
        });

        drop(file_tx);
        let mut files = join_collector(collector)?;
        files.sort();
        Ok(WalkResult {
            files,
            error_count: error_count.load(Ordering::Relaxed),
        })
    })
}

/// Finds files matching a glob pattern (relative to `root`).
///
/// # Errors
///
/// Returns an error if the root directory does not exist or the pattern is
/// invalid.
pub fn find_files(root: &Path, pattern: &str, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let include = [pattern.to_string()];
    let filter = PathFilter::new(&include, &[])?;
    let result = collect_files(root, options, &filter)?;
    Ok(result
        .into_files()
        .into_iter()
        .map(|relative| root.join(relative))
        .collect())
}
