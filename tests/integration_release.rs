// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the update, release and branch commands.
//!
//! Each test lays out a mod folder next to a fake game install:
//!
//! ```text
//! temp/
//!   mod/        modinfo.json, gameconfig.json, Release/ (git work tree)
//!   game/       Version.txt, Mods/<mod>/ (install target)
//! ```

use modbuild_rs::cli::branch::{BranchAction, BranchArgs};
use modbuild_rs::cli::build::UpdateArgs;
use modbuild_rs::cli::release::ReleaseArgs;
use modbuild_rs::cmd::build::run_update_command;
use modbuild_rs::cmd::merge::run_branch_command;
use modbuild_rs::cmd::release::run_release_command;
use modbuild_rs::config::Config;
use modbuild_rs::context::{Context, GameConfig, ModInfo};
use modbuild_rs::error::{GitError, ModError};
use modbuild_rs::git::query::current_branch;
use modbuild_rs::version::ModVersion;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

struct Fixture {
    temp: TempDir,
}

impl Fixture {
    fn new(game: &str) -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let fixture = Self { temp };

        let mut info = ModInfo::scaffold("Better Doors", "Jane Doe");
        info.source_dir = "Release".to_string();
        let game = GameConfig::scaffold(game, fixture.game_dir().join("Mods"));
        write(
            &fixture.mod_dir(),
            "modinfo.json",
            &serde_json::to_string_pretty(&info).unwrap(),
        );
        write(
            &fixture.mod_dir(),
            "gameconfig.json",
            &serde_json::to_string_pretty(&game).unwrap(),
        );
        write(&fixture.mod_dir(), "Release/Defs/Doors.xml", "<Defs/>");
        write(&fixture.mod_dir(), "Release/Assemblies/Doors.pdb", "symbols");
        write(&fixture.game_dir(), "Version.txt", "1.5.4104 rev435\n");
        fixture
    }

    fn mod_dir(&self) -> PathBuf {
        self.temp.path().join("mod")
    }

    fn game_dir(&self) -> PathBuf {
        self.temp.path().join("game")
    }

    fn target_dir(&self) -> PathBuf {
        self.game_dir().join("Mods/BetterDoors")
    }

    fn context(&self) -> Context {
        Context::discover(&self.mod_dir()).unwrap()
    }

    fn version(&self) -> ModVersion {
        self.context().mod_info.version
    }

    /// Turn the mod folder into a repository with everything committed.
    fn init_git(&self) {
        let dir = self.mod_dir();
        git(&dir, &["init", "-q"]);
        git(&dir, &["config", "user.email", "test@test.com"]);
        git(&dir, &["config", "user.name", "Test"]);
        git(&dir, &["add", "--all"]);
        git(&dir, &["commit", "-q", "-m", "Initial commit"]);
        git(&dir, &["branch", "-M", "main"]);
    }

    /// Bare repository as `origin`, with `main` pushed and tracked.
    fn add_remote(&self) -> TempDir {
        let remote = tempfile::tempdir().expect("failed to create temp dir");
        git(remote.path(), &["init", "-q", "--bare"]);
        let dir = self.mod_dir();
        git(&dir, &["remote", "add", "origin", &remote.path().to_string_lossy()]);
        git(&dir, &["push", "-q", "-u", "origin", "main"]);
        remote
    }

    fn commit(&self, relative: &str, message: &str) {
        let dir = self.mod_dir();
        write(&dir, relative, message);
        git(&dir, &["add", "--all"]);
        git(&dir, &["commit", "-q", "-m", message]);
    }

    fn mod_info(&self) -> serde_json::Value {
        let text = fs::read_to_string(self.mod_dir().join("modinfo.json")).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

fn git_error(err: &anyhow::Error) -> &GitError {
    match err.downcast_ref::<ModError>() {
        Some(ModError::Git(e)) => &**e,
        other => panic!("expected a git error, got {other:?}: {err:#}"),
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn git(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn dry_config() -> Config {
    let mut config = Config::default();
    config.global.dry = true;
    config
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn update_installs_source_tree() {
    let fixture = Fixture::new("RimWorld");
    let args = UpdateArgs {
        no_build: true,
        ..UpdateArgs::default()
    };

    run_update_command(&mut fixture.context(), &args, &Config::default())
        .await
        .unwrap();

    let target = fixture.target_dir();
    assert!(target.join("Defs/Doors.xml").is_file());
    assert!(!target.join("Assemblies/Doors.pdb").exists());
    // --no-build implies --no-bump
    assert_eq!(fixture.version(), ModVersion::new(0, 1, 0));

    let about = fs::read_to_string(fixture.mod_dir().join("About/About.xml")).unwrap();
    assert!(about.contains("<packageId>JaneDoe.BetterDoors</packageId>"));
    assert!(about.contains("<li>1.5</li>"));
}

#[tokio::test]
async fn update_bumps_build_and_skips_missing_solution() {
    let fixture = Fixture::new("RimWorld");
    write(&fixture.target_dir(), "stale.txt", "old install");

    run_update_command(&mut fixture.context(), &UpdateArgs::default(), &Config::default())
        .await
        .unwrap();

    assert_eq!(fixture.version(), ModVersion::new(0, 1, 1));
    assert!(!fixture.target_dir().join("stale.txt").exists());
}

#[tokio::test]
async fn update_other_game_skips_about() {
    let fixture = Fixture::new("Kenshi");
    let args = UpdateArgs {
        no_bump: true,
        ..UpdateArgs::default()
    };

    run_update_command(&mut fixture.context(), &args, &Config::default())
        .await
        .unwrap();
    assert!(!fixture.mod_dir().join("About").exists());
    assert!(fixture.target_dir().join("Defs/Doors.xml").is_file());
}

#[tokio::test]
async fn update_dry_run_writes_nothing() {
    let fixture = Fixture::new("RimWorld");

    run_update_command(&mut fixture.context(), &UpdateArgs::default(), &dry_config())
        .await
        .unwrap();

    assert_eq!(fixture.version(), ModVersion::new(0, 1, 0));
    assert!(!fixture.target_dir().exists());
    assert!(!fixture.mod_dir().join("About").exists());
}

// =============================================================================
// Release
// =============================================================================

#[tokio::test]
async fn release_commits_and_copies_for_other_games() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();

    run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap();

    assert_eq!(fixture.version(), ModVersion::new(0, 2, 0));
    insta::assert_snapshot!(git(&fixture.mod_dir(), &["log", "-1", "--format=%s"]), @"release v0.2.0");
    assert!(fixture.target_dir().join("Defs/Doors.xml").is_file());
    assert!(!fixture.target_dir().join("LoadFolders.xml").exists());
}

#[tokio::test]
async fn release_major_resets_minor() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();
    let args = ReleaseArgs {
        major: true,
        ..ReleaseArgs::default()
    };

    run_release_command(&mut fixture.context(), &args, &Config::default())
        .await
        .unwrap();
    assert_eq!(fixture.version(), ModVersion::new(1, 0, 0));
}

#[tokio::test]
async fn release_merges_version_branches_for_rimworld() {
    let fixture = Fixture::new("RimWorld");
    fixture.init_git();
    let dir = fixture.mod_dir();
    for version in ["1.4", "1.5"] {
        git(&dir, &["checkout", "-q", "-b", version, "main"]);
        write(
            &dir,
            "About/About.xml",
            &format!(
                "<ModMetaData><name>Better Doors</name><author>Jane Doe</author>\
                 <packageId>JaneDoe.BetterDoors</packageId>\
                 <supportedVersions><li>{version}</li></supportedVersions></ModMetaData>"
            ),
        );
        write(&dir, "Textures/door.png", version);
        git(&dir, &["add", "--all"]);
        git(&dir, &["commit", "-q", "-m", version]);
    }
    git(&dir, &["checkout", "-q", "main"]);

    run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap();

    let target = fixture.target_dir();
    assert!(target.join("LoadFolders.xml").is_file());
    assert_eq!(
        fs::read_to_string(target.join("1.5/Textures/door.png")).unwrap(),
        "1.5"
    );
    let about = fs::read_to_string(target.join("About/About.xml")).unwrap();
    assert!(about.contains("<li>1.4</li>"));
    assert!(about.contains("<li>1.5</li>"));
    assert_eq!(current_branch(&dir).unwrap(), Some("main".to_string()));
    assert_eq!(
        git(&dir, &["log", "-1", "--format=%s", "main"]),
        "release v0.2.0"
    );
}

#[tokio::test]
async fn release_refuses_uncommitted_changes() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();
    write(&fixture.mod_dir(), "Release/Defs/More.xml", "<Defs/>");

    let err = run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("uncommitted changes"));
    assert_eq!(fixture.version(), ModVersion::new(0, 1, 0));

    let forced = ReleaseArgs {
        force: true,
        ..ReleaseArgs::default()
    };
    run_release_command(&mut fixture.context(), &forced, &Config::default())
        .await
        .unwrap();
    assert_eq!(fixture.version(), ModVersion::new(0, 2, 0));
}

#[tokio::test]
async fn release_dry_run_leaves_repository_alone() {
    let fixture = Fixture::new("RimWorld");
    fixture.init_git();
    let head = git(&fixture.mod_dir(), &["rev-parse", "HEAD"]);

    run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &dry_config())
        .await
        .unwrap();

    assert_eq!(git(&fixture.mod_dir(), &["rev-parse", "HEAD"]), head);
    assert_eq!(fixture.version(), ModVersion::new(0, 1, 0));
    assert!(!fixture.target_dir().exists());
}

#[tokio::test]
async fn release_pushes_commit_and_tag_to_upstream() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();
    let remote = fixture.add_remote();

    run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap();

    let head = git(&fixture.mod_dir(), &["rev-parse", "HEAD"]);
    assert_eq!(git(remote.path(), &["rev-parse", "main"]), head);
    assert_eq!(git(remote.path(), &["tag", "--list"]), "v0.2.0");
}

#[tokio::test]
async fn release_refuses_unpushed_commits_unless_forced() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();
    let remote = fixture.add_remote();
    fixture.commit("Release/Defs/More.xml", "more doors");

    let err = run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap_err();
    assert!(
        matches!(git_error(&err), GitError::UnpushedCommits { ahead: 1, upstream } if upstream == "origin/main"),
        "{err:#}"
    );
    assert_eq!(fixture.version(), ModVersion::new(0, 1, 0));

    let forced = ReleaseArgs {
        force: true,
        ..ReleaseArgs::default()
    };
    run_release_command(&mut fixture.context(), &forced, &Config::default())
        .await
        .unwrap();
    assert_eq!(fixture.version(), ModVersion::new(0, 2, 0));
    assert_eq!(
        git(remote.path(), &["log", "-1", "--format=%s", "main"]),
        "release v0.2.0"
    );
}

#[tokio::test]
async fn release_refuses_branch_behind_upstream() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();
    let _remote = fixture.add_remote();
    fixture.commit("Release/Defs/More.xml", "more doors");
    git(&fixture.mod_dir(), &["push", "-q"]);
    git(&fixture.mod_dir(), &["reset", "-q", "--hard", "HEAD~1"]);

    let forced = ReleaseArgs {
        force: true,
        ..ReleaseArgs::default()
    };
    let err = run_release_command(&mut fixture.context(), &forced, &Config::default())
        .await
        .unwrap_err();
    assert!(
        matches!(git_error(&err), GitError::BehindRemote { behind: 1, .. }),
        "{err:#}"
    );
    assert_eq!(fixture.version(), ModVersion::new(0, 1, 0));
}

#[tokio::test]
async fn release_records_changes_since_last_tag() {
    let fixture = Fixture::new("Kenshi");
    fixture.init_git();
    git(&fixture.mod_dir(), &["tag", "-a", "v0.1.0", "-m", "release v0.1.0"]);
    fixture.commit("Release/Defs/More.xml", "add sliding doors");
    fixture.commit("notes.txt", "tidy notes [nolog]");

    run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap();

    let info = fixture.mod_info();
    let changelog = info["changelog"].as_array().unwrap();
    let messages: Vec<&str> = changelog
        .iter()
        .map(|entry| entry["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, vec!["add sliding doors"]);
    assert_eq!(changelog[0]["author"]["name"], "Test");
    assert_eq!(changelog[0]["author"]["email"], "test@test.com");

    // the changelog is part of the release commit
    let tracked = git(&fixture.mod_dir(), &["show", "HEAD:modinfo.json"]);
    assert!(tracked.contains("add sliding doors"));
    assert_eq!(git(&fixture.mod_dir(), &["describe", "--tags"]), "v0.2.0");
}

#[tokio::test]
async fn release_writes_archive_when_configured() {
    let fixture = Fixture::new("Kenshi");
    let mut game = GameConfig::scaffold("Kenshi", fixture.game_dir().join("Mods"));
    game.archive_dir = Some(PathBuf::from("archives"));
    write(
        &fixture.mod_dir(),
        "gameconfig.json",
        &serde_json::to_string_pretty(&game).unwrap(),
    );
    fixture.init_git();

    run_release_command(&mut fixture.context(), &ReleaseArgs::default(), &Config::default())
        .await
        .unwrap();

    let archive = fixture.mod_dir().join("archives/Better Doors v0.2.0.zip");
    assert!(archive.is_file());
}

// =============================================================================
// Branch
// =============================================================================

fn create(name: &str, upstream: bool) -> BranchArgs {
    BranchArgs {
        action: BranchAction::Create {
            name: name.to_string(),
            upstream,
        },
    }
}

#[test]
fn branch_create_pushes_upstream_and_refuses_remote_names() {
    let fixture = Fixture::new("RimWorld");
    fixture.init_git();
    let remote = fixture.add_remote();
    let dir = fixture.mod_dir();
    let context = fixture.context();

    run_branch_command(&context, &create("1.6", true), false).unwrap();
    assert_eq!(current_branch(&dir).unwrap().as_deref(), Some("1.6"));
    assert_eq!(git(remote.path(), &["branch", "--list", "1.6"]), "1.6");
    assert_eq!(
        git(&dir, &["rev-parse", "--abbrev-ref", "@{upstream}"]),
        "origin/1.6"
    );

    git(&dir, &["checkout", "-q", "main"]);
    git(&dir, &["branch", "-q", "-D", "1.6"]);
    let err = run_branch_command(&context, &create("1.6", false), false).unwrap_err();
    assert!(
        matches!(git_error(&err), GitError::RemoteBranchExists { name } if name == "origin/1.6"),
        "{err:#}"
    );
}

#[test]
fn branch_upstream_defaults_to_current_branch() {
    let fixture = Fixture::new("RimWorld");
    fixture.init_git();
    let _remote = fixture.add_remote();
    let dir = fixture.mod_dir();
    git(&dir, &["branch", "--unset-upstream"]);

    let args = BranchArgs {
        action: BranchAction::Upstream { branch: None },
    };
    run_branch_command(&fixture.context(), &args, false).unwrap();
    assert_eq!(
        git(&dir, &["rev-parse", "--abbrev-ref", "@{upstream}"]),
        "origin/main"
    );
}
