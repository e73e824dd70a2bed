// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git access.
//!
//! ```text
//! query.rs  is_git_repo, current_branch, has_uncommitted_changes   (gix)
//! ops.rs    list_branches, show_file, ensure_clean,                (git)
//!           commits_since_latest_tag, upstream_branch, fetch_and_compare
//! cmd.rs    checkout, init_repo, commit_all, create_branch,        (git)
//!           tag, push, set_upstream
//!              |
//!              v
//!          backend: GitQuery / GitRevisions / GitMutation / GitRemote
//! ```

pub mod backend;
pub mod cmd;
pub mod ops;
pub mod query;
