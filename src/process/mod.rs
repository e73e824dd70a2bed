// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::which("dotnet")
//!   .args() .cwd() .name()
//!   .run()
//!       --> tokio::process::Command (stdin null, output captured)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//!       --> ProcessError::NonZeroExit unless ALLOW_FAILURE
//! ```

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, trace};

use crate::error::{ModResult, ProcessError};

/// Output from a completed process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    /// Returns the process exit code (0 = success, -1 = killed by signal).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for configuring and running a process.
#[derive(Debug)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    name: Option<String>,
    allow_failure: bool,
}

impl ProcessBuilder {
    /// The program can be a path or a bare name resolved via `PATH` when the
    /// process is spawned.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            name: None,
            allow_failure: false,
        }
    }

    /// Resolve `program` in `PATH` up front.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if it cannot be found.
    pub fn which(program: impl AsRef<OsStr>) -> Result<Self, ProcessError> {
        let program = program.as_ref();
        which::which(program).map(Self::new).map_err(|_| {
            ProcessError::ExecutableNotFound {
                name: program.to_string_lossy().into_owned(),
            }
        })
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Display name for log lines (defaults to the program's file stem).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Return the output instead of failing on a non-zero exit code.
    #[must_use]
    pub const fn allow_failure(mut self) -> Self {
        self.allow_failure = true;
        self
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.program.file_stem().map_or_else(
                || "process".to_string(),
                |s| s.to_string_lossy().into_owned(),
            )
        })
    }

    /// Full command line, quoting arguments with spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program.display().to_string();
        for arg in &self.args {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawn the process and wait for it, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the process cannot start, or
    /// `ProcessError::NonZeroExit` if it fails and failure is not allowed.
    pub async fn run(self) -> ModResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = &self.cwd {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let output = command
            .output()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        let output = ProcessOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !self.allow_failure && !output.success() {
            // build tools often report errors on stdout
            let details = if output.stderr.trim().is_empty() {
                output.stdout()
            } else {
                output.stderr()
            };
            error!(process = %name, output = %details.trim(), "process error output");
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code,
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code, "completed");
        Ok(output)
    }
}
