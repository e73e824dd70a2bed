// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::process::Command;
use tracing::{debug, trace};

use super::{CommitInfo, Divergence, GitMutation, GitQuery, GitRemote, GitRevisions};
use crate::error::{GitError, ModResult};

const FIELD: char = '\x1f';
const RECORD: char = '\x1e';
const LOG_FORMAT: &str = "--format=%H%x1f%aI%x1f%an%x1f%ae%x1f%s%x1e";

/// Runs the `git` executable, never prompting for credentials.
pub struct ShellBackend;

impl ShellBackend {
    /// Trimmed stdout of `git <args>`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> ModResult<String> {
        Self::git_command_raw(args, cwd).map(|out| out.trim().to_string())
    }

    /// Stdout of `git <args>` byte for byte (lossy UTF-8).
    pub(crate) fn git_command_raw(args: &[&str], cwd: &Path) -> ModResult<String> {
        trace!(cwd = %cwd.display(), args = ?args, "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into())
        }
    }
}

/// Records of `git log` with [`LOG_FORMAT`]; malformed records are skipped.
pub(crate) fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .split(RECORD)
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let mut fields = record.split(FIELD);
            let commit = CommitInfo {
                hash: fields.next()?.to_string(),
                date: fields.next()?.to_string(),
                author_name: fields.next()?.to_string(),
                author_email: fields.next()?.to_string(),
                subject: fields.next()?.to_string(),
            };
            if commit.hash.is_empty() {
                return None;
            }
            Some(commit)
        })
        .collect()
}

/// `<ahead>\t<behind>` of `rev-list --left-right --count HEAD...@{u}`.
pub(crate) fn parse_divergence(output: &str) -> Option<Divergence> {
    let mut counts = output.split_whitespace().map(str::parse::<usize>);
    let ahead = counts.next()?.ok()?;
    let behind = counts.next()?.ok()?;
    Some(Divergence { ahead, behind })
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
    }

    fn current_branch(path: &Path) -> ModResult<Option<String>> {
        // symbolic-ref fails on a detached HEAD
        Ok(Self::git_command(&["symbolic-ref", "--short", "HEAD"], path).ok())
    }

    fn has_uncommitted_changes(path: &Path) -> ModResult<bool> {
        Ok(!Self::git_command(&["status", "--porcelain"], path)?.is_empty())
    }
}

impl GitRevisions for ShellBackend {
    fn branches(repo_path: &Path) -> ModResult<Vec<String>> {
        let output = Self::git_command(&["branch", "--format=%(refname:short)"], repo_path)?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    fn file_at(repo_path: &Path, rev: &str, path: &str) -> ModResult<Option<String>> {
        let object = format!("{rev}:{path}");
        if Self::git_command(&["cat-file", "-e", &object], repo_path).is_err() {
            debug!(object = %object, "not present");
            return Ok(None);
        }
        Self::git_command_raw(&["show", &object], repo_path).map(Some)
    }

    fn latest_tag(repo_path: &Path) -> ModResult<Option<String>> {
        // describe fails when no tag is reachable
        Ok(Self::git_command(&["describe", "--abbrev=0", "--tags"], repo_path).ok())
    }

    fn log(repo_path: &Path, since: Option<&str>) -> ModResult<Vec<CommitInfo>> {
        let range = since.map_or_else(|| "HEAD".to_string(), |tag| format!("{tag}..HEAD"));
        let output = Self::git_command_raw(&["log", LOG_FORMAT, &range], repo_path)?;
        Ok(parse_log(&output))
    }

    fn tag_containing(repo_path: &Path, rev: &str) -> ModResult<Option<String>> {
        let Ok(name) = Self::git_command(&["describe", "--tags", "--contains", rev], repo_path)
        else {
            return Ok(None);
        };
        Ok(name
            .split(['~', '^'])
            .next()
            .filter(|tag| !tag.is_empty())
            .map(String::from))
    }
}

impl GitMutation for ShellBackend {
    fn checkout(repo_path: &Path, what: &str) -> ModResult<()> {
        Self::git_command(&["-c", "advice.detachedHead=false", "checkout", "-q", what], repo_path)
            .map(drop)
            .map_err(|e| {
                GitError::CheckoutFailed {
                    what: what.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
    }

    fn init_repo(path: &Path) -> ModResult<()> {
        Self::git_command(&["init", "--quiet"], path).map(drop)
    }

    fn commit_all(repo_path: &Path, message: &str) -> ModResult<bool> {
        if !Self::has_uncommitted_changes(repo_path)? {
            return Ok(false);
        }
        Self::git_command(&["add", "--all"], repo_path)?;
        Self::git_command(&["commit", "--quiet", "-m", message], repo_path)?;
        Ok(true)
    }

    fn create_branch(repo_path: &Path, name: &str) -> ModResult<()> {
        Self::git_command(&["checkout", "-q", "-b", name], repo_path).map(drop)
    }

    fn tag(repo_path: &Path, name: &str, message: &str) -> ModResult<()> {
        Self::git_command(&["tag", "-a", name, "-m", message], repo_path).map(drop)
    }
}

impl GitRemote for ShellBackend {
    fn upstream(repo_path: &Path) -> ModResult<Option<String>> {
        let args = ["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{upstream}"];
        Ok(Self::git_command(&args, repo_path).ok())
    }

    fn remote_branches(repo_path: &Path) -> ModResult<Vec<String>> {
        let output =
            Self::git_command(&["branch", "--remotes", "--format=%(refname:short)"], repo_path)?;
        // `origin/HEAD` shortens to `origin`
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| line.contains('/'))
            .map(String::from)
            .collect())
    }

    fn fetch(repo_path: &Path) -> ModResult<()> {
        Self::git_command(&["fetch", "--quiet"], repo_path).map(drop)
    }

    fn divergence(repo_path: &Path) -> ModResult<Divergence> {
        let args = ["rev-list", "--left-right", "--count", "HEAD...@{upstream}"];
        let output = Self::git_command(&args, repo_path)?;
        parse_divergence(&output).ok_or_else(|| {
            GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: format!("unexpected output '{output}'"),
            }
            .into()
        })
    }

    fn push(repo_path: &Path) -> ModResult<()> {
        Self::git_command(&["push", "--quiet", "--follow-tags"], repo_path).map(drop)
    }

    fn track(repo_path: &Path, remote: &str, branch: &str) -> ModResult<()> {
        let upstream = format!("--set-upstream-to={remote}/{branch}");
        Self::git_command(&["branch", "--quiet", &upstream, branch], repo_path).map(drop)
    }

    fn push_upstream(repo_path: &Path, remote: &str, branch: &str) -> ModResult<()> {
        Self::git_command(&["push", "--quiet", "--set-upstream", remote, branch], repo_path)
            .map(drop)
    }
}
