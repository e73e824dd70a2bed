// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       project / merge / update / release
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   config        context   |
//!              |  mod.toml   modinfo.json  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!              merge      manifest   dotnet
//!          branches/copy  About.xml  build
//!                 |                    |
//!                 v                    v
//!                git                process
//!              gix/CLI            tokio spawn
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility,  |
//!   |               version                   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod context;
pub mod dotnet;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod merge;
pub mod process;
pub mod utility;
pub mod version;
