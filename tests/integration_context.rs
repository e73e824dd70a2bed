// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the project commands: scaffolding the project
//! files, editing the version and dependencies, and generating About.xml.

use clap::Parser;
use modbuild_rs::cli::{Cli, Command};
use modbuild_rs::cmd::config::run_config_command;
use modbuild_rs::cmd::project::{
    format_dependencies, run_bump_command, run_dependency_command, run_set_version_command,
    update_about,
};
use modbuild_rs::context::{Context, DependencyKind, GAMECONFIG_FILE, MODINFO_FILE};
use modbuild_rs::manifest::read_manifest;
use modbuild_rs::version::ModVersion;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn command(args: &[&str]) -> Command {
    let mut argv = vec!["mod"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
        .unwrap()
        .command
        .expect("a command")
}

/// Scaffold both project files through the `config` command.
fn scaffold() -> TempDir {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let dir = temp.path().display().to_string();
    let mods = temp.path().join("RimWorld/Mods").display().to_string();

    for args in [
        vec!["config", "mod", "-n", "Better Doors", "-a", "Jane Doe", "-d", dir.as_str()],
        vec!["config", "game", "-t", mods.as_str(), "-d", dir.as_str()],
    ] {
        let Command::Config(config) = command(&args) else {
            panic!("expected config");
        };
        run_config_command(&config, false).unwrap();
    }
    temp
}

fn context(dir: &Path) -> Context {
    Context::discover(dir).unwrap()
}

// =============================================================================
// Scaffolding
// =============================================================================

#[test]
fn context_scaffold_and_discover() {
    let temp = scaffold();
    let nested = temp.path().join("Source/Doors");
    fs::create_dir_all(&nested).unwrap();

    let context = context(&nested);
    assert_eq!(context.mod_info.name, "Better Doors");
    assert_eq!(context.mod_info.version, ModVersion::new(0, 1, 0));
    assert_eq!(context.game.name, "RimWorld");
    assert_eq!(context.build.base_dir, temp.path());
    assert_eq!(
        context.build.target_dir,
        temp.path().join("RimWorld/Mods/BetterDoors")
    );
}

#[test]
fn context_scaffold_refuses_overwrite() {
    let temp = scaffold();
    let dir = temp.path().display().to_string();
    let Command::Config(args) = command(&["config", "mod", "-n", "X", "-a", "Y", "-d", dir.as_str()])
    else {
        panic!("expected config");
    };
    assert!(run_config_command(&args, false).is_err());
    assert_eq!(context(temp.path()).mod_info.name, "Better Doors");
}

#[test]
fn context_scaffold_dry_run() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().display().to_string();
    let Command::Config(args) = command(&["config", "mod", "-n", "X", "-a", "Y", "-d", dir.as_str()])
    else {
        panic!("expected config");
    };
    run_config_command(&args, true).unwrap();
    assert!(!temp.path().join(MODINFO_FILE).exists());
    assert!(!temp.path().join(GAMECONFIG_FILE).exists());
}

// =============================================================================
// Version
// =============================================================================

#[test]
fn context_bump_and_set_version() {
    let temp = scaffold();

    let Command::Bump(bump) = command(&["bump", "minor"]) else {
        panic!("expected bump");
    };
    run_bump_command(&mut context(temp.path()), &bump, false).unwrap();
    assert_eq!(context(temp.path()).mod_info.version, ModVersion::new(0, 2, 0));

    let Command::SetVersion(set) = command(&["set-version", "--build", "7"]) else {
        panic!("expected set-version");
    };
    run_set_version_command(&mut context(temp.path()), &set, false).unwrap();
    assert_eq!(context(temp.path()).mod_info.version, ModVersion::new(0, 2, 7));

    let Command::SetVersion(set) = command(&["set-version", "v2.0"]) else {
        panic!("expected set-version");
    };
    run_set_version_command(&mut context(temp.path()), &set, true).unwrap();
    assert_eq!(context(temp.path()).mod_info.version, ModVersion::new(0, 2, 7));
}

// =============================================================================
// Dependencies
// =============================================================================

#[test]
fn context_dependency_add_list_remove() {
    let temp = scaffold();

    let Command::Dependency(add) = command(&[
        "dependency",
        "add",
        "brrainz.harmony",
        "-n",
        "Harmony",
        "--steam-id",
        "2009463077",
    ]) else {
        panic!("expected dependency");
    };
    run_dependency_command(&mut context(temp.path()), &add, false).unwrap();
    // the same id again is rejected
    assert!(run_dependency_command(&mut context(temp.path()), &add, false).is_err());

    let loaded = context(temp.path());
    assert_eq!(loaded.mod_info.dependencies.len(), 1);
    assert_eq!(loaded.mod_info.dependencies[0].kind, DependencyKind::Required);
    insta::assert_snapshot!(format_dependencies(&loaded).join("\n"), @r#"brrainz.harmony (required) "Harmony""#);

    let Command::Dependency(remove) = command(&["dep", "remove", "brrainz.harmony"]) else {
        panic!("expected dependency");
    };
    run_dependency_command(&mut context(temp.path()), &remove, false).unwrap();
    let loaded = context(temp.path());
    assert!(loaded.mod_info.dependencies.is_empty());
    insta::assert_snapshot!(format_dependencies(&loaded).join("\n"), @"No dependencies");
}

// =============================================================================
// About.xml
// =============================================================================

#[tokio::test]
async fn context_about_generation() {
    let temp = scaffold();
    fs::create_dir_all(temp.path().join("RimWorld")).unwrap();
    fs::write(temp.path().join("RimWorld/Version.txt"), "1.5.4104 rev435\n").unwrap();
    fs::create_dir_all(temp.path().join("About")).unwrap();
    fs::write(temp.path().join("About/description.md"), "Doors that open both ways.\n").unwrap();

    let Command::Dependency(add) = command(&[
        "dep", "add", "brrainz.harmony", "-n", "Harmony", "--steam-id", "2009463077",
    ]) else {
        panic!("expected dependency");
    };
    run_dependency_command(&mut context(temp.path()), &add, false).unwrap();

    let path = update_about(&context(temp.path()), false).await.unwrap();
    assert_eq!(path, temp.path().join("About/About.xml"));

    let xml = fs::read_to_string(&path).unwrap();
    let manifest = read_manifest(&xml, "About.xml").unwrap();
    assert_eq!(manifest.package_id, "JaneDoe.BetterDoors");
    assert_eq!(manifest.supported_versions, vec!["1.5"]);
    assert_eq!(manifest.description.as_deref(), Some("Doors that open both ways."));
    assert_eq!(manifest.load_after, Some(vec!["brrainz.harmony".to_string()]));
    assert!(xml.contains("<steamWorkshopUrl>steam://url/CommunityFilePage/2009463077</steamWorkshopUrl>"));
}

#[tokio::test]
async fn context_about_without_game_version_fails() {
    let temp = scaffold();
    let err = update_about(&context(temp.path()), false).await.unwrap_err();
    assert!(format!("{err:#}").contains("Version.txt"));
    assert!(!temp.path().join("About/About.xml").exists());
}
