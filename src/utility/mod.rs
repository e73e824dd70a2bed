// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  collect_files(), find_files(), PathFilter, WalkOptions
//!   copy:  copy_file(), copy_directory(), clear_directory()
//!   archive: create_archive()
//! ```

pub mod fs;
