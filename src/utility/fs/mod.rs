// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  collect_files()  ignore::WalkParallel + PathFilter, sorted
//!        find_files()     single glob, absolute paths
//!        PathFilter       include/exclude globs (wax)
//! copy:  copy_file()      tokio::fs, creates parents
//!        copy_directory() filtered recursive copy
//!        clear_directory() remove, missing is fine
//! archive: create_archive() store-only zip (zip)
//! ```

pub mod archive;
pub mod copy;
pub mod walk;

pub use archive::{ArchiveSummary, create_archive};
pub use copy::{clear_directory, copy_directory, copy_file};
pub use walk::{PathFilter, WalkOptions, collect_files, find_files};
