// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config, project (bump/set-version/dependency/about),
//!   merge (branches/merge), build (update), release
//! ```

pub mod build;
pub mod config;
pub mod merge;
pub mod project;
pub mod release;

use anyhow::Context as _;

use crate::context::Context;
use crate::error::Result;

/// Game name that enables RimWorld specific steps (About.xml, merge).
pub const RIMWORLD: &str = "RimWorld";

/// Load the project context for the current directory.
///
/// # Errors
///
/// Returns an error if the current directory is unreadable or the project
/// files are missing or invalid.
pub fn current_context() -> Result<Context> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Context::discover(&cwd)
}

/// Whether `context` targets RimWorld.
#[must_use]
pub fn is_rimworld(context: &Context) -> bool {
    context.game.name.eq_ignore_ascii_case(RIMWORLD)
}
