// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types.
//!
//! ```text
//! ModError                        what failed
//!   Bailed(Box<str>)              a command gave up
//!   Git(Box<GitError>)            repository access, checkout, commit
//!   Config(Box<ConfigError>)      mod.toml, modinfo.json, gameconfig.json
//!   Process(Box<ProcessError>)    dotnet and other tools
//!   Fs(Box<FsError>)              copy, walk, clear
//!   Manifest(Box<ManifestError>)  About.xml read/write
//!   Merge(Box<MergeError>)        version branches, rules
//!   Io(Box<io::Error>)
//! ```
//!
//! Library code returns [`ModResult`]; commands and `main` use the
//! `anyhow` based [`Result`], so `downcast_ref::<ModError>()` recovers the
//! typed error.

use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;

pub type ModResult<T> = std::result::Result<T, ModError>;

/// Every payload is boxed, keeping `ModResult<()>` within three words.
#[derive(Debug, Error)]
pub enum ModError {
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    #[error("merge error: {0}")]
    Merge(#[from] Box<MergeError>),

    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Stop the current command with `message`.
pub fn bail_out(message: impl Into<String>) -> ModError {
    ModError::Bailed(message.into().into_boxed_str())
}

macro_rules! boxed_into_mod_error {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ModError {
                fn from(err: $error) -> Self {
                    Self::$variant(Box::new(err))
                }
            }
        )+
    };
}

boxed_into_mod_error! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    ManifestError => Manifest,
    MergeError => Merge,
    std::io::Error => Io,
}

#[derive(Debug, Error)]
pub enum GitError {
    /// `gix` could not open a repository at or above the path.
    #[error("not a git repository: {0}")]
    Discover(#[source] Box<gix::discover::Error>),

    #[error("failed to read HEAD: {0}")]
    Head(#[source] Box<gix::reference::find::existing::Error>),

    /// The `git` executable failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },

    #[error("uncommitted changes in {path}")]
    UncommittedChanges { path: String },

    #[error("local branch is {ahead} commits ahead of {upstream}")]
    UnpushedCommits { upstream: String, ahead: usize },

    #[error("local branch is {behind} commits behind {upstream}")]
    BehindRemote { upstream: String, behind: usize },

    #[error("branch {name} already exists on the remote")]
    RemoteBranchExists { name: String },

    /// HEAD is detached and no branch was named.
    #[error("no branch checked out")]
    DetachedHead,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// `modinfo.json` or `gameconfig.json` is missing.
    #[error("{0} not found, make sure you are running this command from inside a mod directory")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("walk of '{path}' failed on {errors} entries")]
    WalkIncomplete { path: String, errors: usize },

    #[error("failed to write archive '{path}': {message}")]
    Archive { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum ManifestError {
    /// `source_name` is a path or `<branch>:<path>` for manifests read
    /// from git.
    #[error("failed to parse manifest '{source_name}': {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("failed to write manifest '{path}': {message}")]
    Write { path: String, message: String },
}

/// Preconditions of the multi-version merge.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No branch named `<major>.<minor>` exists.
    #[error("no version branches found in {path}")]
    NoVersionBranches { path: String },

    #[error("no manifest found at '{path}' on branch {branch}")]
    ManifestNotFound { branch: String, path: String },

    #[error("invalid version range '{range}': {message}")]
    InvalidRule { range: String, message: String },
}
