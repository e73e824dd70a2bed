// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! ```text
//! TaskSpan::start("merge versions")  INFO task="merge versions" starting...
//!   .inform("1.0: 12 files")         INFO ... elapsed_ms=40 1.0: 12 files
//!   .success("1.0, 1.1")             INFO ... elapsed_ms=124 done: 1.0, 1.1
//! ```

use std::time::Instant;
use tracing::{info, warn};

/// A named step of a command, logged with the time spent on it.
#[derive(Debug)]
pub struct TaskSpan {
    name: &'static str,
    started: Instant,
}

impl TaskSpan {
    #[must_use]
    pub fn start(name: &'static str) -> Self {
        info!(task = name, "starting...");
        Self {
            name,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    pub fn inform(&self, message: impl AsRef<str>) {
        info!(task = self.name, elapsed_ms = self.elapsed_ms(), "{}", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        warn!(task = self.name, elapsed_ms = self.elapsed_ms(), "{}", message.as_ref());
    }

    /// Consumes the span; there is no failure counterpart, errors propagate.
    pub fn success(self, message: impl AsRef<str>) {
        info!(task = self.name, elapsed_ms = self.elapsed_ms(), "done: {}", message.as_ref());
    }
}
