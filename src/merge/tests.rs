// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::branches::{coerce_version, select_version_branches};
use super::classify::{VersionClassifier, parse_range};
use super::consolidate::consolidate;
use super::output::load_folder_versions;
use super::reconcile::Reconciler;
use super::{MergeOptions, VersionBranch};
use crate::config::types::{FolderRule, MergeConfig};
use crate::manifest::{Consolidated, Manifest, ModDependency};
use semver::Version;
use std::path::{Path, PathBuf};

fn branch(name: &str) -> VersionBranch {
    VersionBranch {
        name: name.to_string(),
        version: coerce_version(name).unwrap(),
    }
}

fn default_classifier() -> VersionClassifier {
    VersionClassifier::from_rules(&MergeConfig::default().rules).unwrap()
}

fn snapshot(version: &str) -> Manifest {
    Manifest {
        name: "Better Doors".to_string(),
        author: "Jane Doe".to_string(),
        package_id: "JaneDoe.BetterDoors".to_string(),
        url: Some("https://example.org".to_string()),
        supported_versions: vec![version.to_string()],
        description: Some("Doors.".to_string()),
        ..Manifest::default()
    }
    .with_game_version(version)
}

// --- Branch selection ---

#[test]
fn test_select_filters_and_sorts() {
    let names = ["main", "1.1", "1.0", "1.10", "feature/1.2", "v1.3", "1.2.1", "1.9"];
    let branches = select_version_branches(names).unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    // numeric, not lexicographic
    assert_eq!(names, vec!["1.0", "1.1", "1.9", "1.10"]);
    assert_eq!(branches[3].version, Version::new(1, 10, 0));
}

#[test]
fn test_select_without_version_branches() {
    let branches = select_version_branches(["main", "develop"]).unwrap();
    assert!(branches.is_empty());
}

#[test]
fn test_select_keeps_one_branch_per_version() {
    let branches = select_version_branches(["01.1", "1.0", "1.1", "1.01"]).unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["1.0", "1.1"]);
}

#[test]
fn test_coerce_version() {
    assert_eq!(coerce_version("1.4"), Some(Version::new(1, 4, 0)));
    assert_eq!(coerce_version("main"), None);
    insta::assert_snapshot!(branch("1.5").to_string(), @"1.5");
}

// --- Classifier ---

#[test]
fn test_classifier_default_table() {
    let classifier = default_classifier();
    let v10 = Version::new(1, 0, 0);
    let v14 = Version::new(1, 4, 0);

    assert!(classifier.is_versioned(Path::new("Defs/Things.xml"), &v10));
    assert!(!classifier.is_versioned(Path::new("Textures/door.png"), &v10));
    assert!(classifier.is_versioned(Path::new("Textures/door.png"), &v14));
    assert!(classifier.is_versioned(Path::new("Languages\\English\\Keyed.xml"), &v14));
    assert!(!classifier.is_versioned(Path::new("About/About.xml"), &v14));
    // only the first segment counts
    assert!(!classifier.is_versioned(Path::new("Common/Defs/Things.xml"), &v14));
}

#[test]
fn test_classifier_without_matching_rule() {
    let classifier = default_classifier();
    assert!(!classifier.is_versioned(Path::new("Defs/Things.xml"), &Version::new(0, 19, 0)));
}

#[test]
fn test_classifier_first_rule_wins() {
    let rules = [
        FolderRule::new(">=1.0", &["Defs"]),
        FolderRule::new(">=1.1", &["Textures"]),
    ];
    let classifier = VersionClassifier::from_rules(&rules).unwrap();
    let v12 = Version::new(1, 2, 0);
    assert!(classifier.is_versioned(Path::new("Defs/a.xml"), &v12));
    assert!(!classifier.is_versioned(Path::new("Textures/a.png"), &v12));
}

#[test]
fn test_invalid_rule_range() {
    let err = VersionClassifier::from_rules(&[FolderRule::new("one point oh", &["Defs"])])
        .unwrap_err();
    assert!(err.to_string().contains("one point oh"));
    assert!(parse_range(">=1.1").is_ok());
}

#[test]
fn test_range_without_operator_is_rejected() {
    let err = parse_range("1.0").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"merge error: invalid version range '1.0': '1.0' has no operator, write '=1.0' for an exact version"
    );
    assert!(parse_range(">=1.0, 1.2").is_err());
    assert!(parse_range("=1.0").unwrap().matches(&Version::new(1, 0, 0)));
    assert!(!parse_range("=1.0").unwrap().matches(&Version::new(1, 1, 0)));
}

// --- Consolidation ---

#[test]
fn test_consolidate_identical_snapshots() {
    let merged = consolidate(&[snapshot("1.0"), snapshot("1.1")]);

    assert_eq!(merged.name, "Better Doors");
    assert_eq!(merged.supported_versions, vec!["1.0", "1.1"]);
    assert_eq!(merged.description, Consolidated::Shared(Some("Doors.".to_string())));
    assert_eq!(merged.default_description, None);
    assert_eq!(merged.load_after, Consolidated::Shared(None));
    assert!(!merged.mod_dependencies.is_by_version());
}

#[test]
fn test_consolidate_divergent_dependencies() {
    let old = snapshot("1.0");
    let mut new = snapshot("1.1");
    new.mod_dependencies = Some(vec![ModDependency {
        package_id: "brrainz.harmony".to_string(),
        display_name: Some("Harmony".to_string()),
        ..ModDependency::default()
    }]);

    let merged = consolidate(&[old, new.clone()]);
    assert_eq!(
        merged.mod_dependencies,
        Consolidated::ByVersion(vec![
            ("1.0".to_string(), None),
            ("1.1".to_string(), new.mod_dependencies.clone()),
        ])
    );
    assert_eq!(merged.description.shared().map(String::as_str), Some("Doors."));
}

#[test]
fn test_consolidate_description_falls_back_to_1_0() {
    let mut old = snapshot("1.0");
    old.description = Some("Old doors.".to_string());
    let merged = consolidate(&[old, snapshot("1.1")]);

    assert!(merged.description.is_by_version());
    assert_eq!(merged.default_description.as_deref(), Some("Old doors."));

    let mut a = snapshot("1.1");
    a.description = Some("a".to_string());
    let merged = consolidate(&[a, snapshot("1.2")]);
    assert_eq!(merged.default_description, None);
}

#[test]
fn test_consolidate_identity_fields() {
    let mut old = snapshot("1.0");
    old.package_id = "JaneDoe.Doors".to_string();
    let mut new = snapshot("1.1");
    new.name = "Best Doors".to_string();
    new.url = None;

    let merged = consolidate(&[old, new]);
    assert_eq!(merged.package_id, "JaneDoe.BetterDoors");
    assert_eq!(merged.name, "Better Doors");
    assert_eq!(merged.url.as_deref(), Some("https://example.org"));
}

#[test]
fn test_consolidate_single_snapshot() {
    let merged = consolidate(&[snapshot("1.4")]);
    assert_eq!(merged.supported_versions, vec!["1.4"]);
    assert!(!merged.description.is_by_version());
    assert_eq!(consolidate(&[]).name, "");
}

// --- Output ---

#[test]
fn test_load_folders_skip_unversioned_policy() {
    let branches = [branch("1.0"), branch("1.1"), branch("1.4")];
    let versioned = parse_range(">=1.1").unwrap();
    assert_eq!(load_folder_versions(&branches, &versioned), vec!["1.1", "1.4"]);
}

// --- Reconciler ---

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_reconcile_routes_files() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "Defs/Things.xml", "defs");
    write(source.path(), "Textures/door.png", "png");

    let classifier = default_classifier();
    let versioned = parse_range(">=1.1").unwrap();
    let reconciler = Reconciler::new(source.path(), target.path(), &classifier, &versioned);
    let files = vec![PathBuf::from("Defs/Things.xml"), PathBuf::from("Textures/door.png")];

    let report = reconciler.reconcile(&branch("1.0"), &files).await.unwrap();
    assert_eq!(report.copied, 2);
    assert_eq!(report.shared, 1);
    assert!(report.unversioned.is_empty());
    assert!(target.path().join("Textures/door.png").is_file());
    assert!(!target.path().join("Defs/Things.xml").exists());
    assert!(target.path().join("1.0/Defs/Things.xml").is_file());
    assert!(target.path().join("1.0/Textures/door.png").is_file());
}

#[tokio::test]
async fn test_reconcile_reports_unversioned() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write(source.path(), "Sounds/knock.ogg", "ogg");
    write(source.path(), "Common/readme.txt", "txt");

    let classifier = default_classifier();
    let versioned = parse_range(">=1.1").unwrap();
    let reconciler = Reconciler::new(source.path(), target.path(), &classifier, &versioned);
    let files = vec![PathBuf::from("Common/readme.txt"), PathBuf::from("Sounds/knock.ogg")];

    let report = reconciler.reconcile(&branch("1.2"), &files).await.unwrap();
    assert_eq!(report.unversioned, vec![PathBuf::from("Common/readme.txt")]);
    assert_eq!(
        std::fs::read_to_string(target.path().join("Common/readme.txt")).unwrap(),
        "txt"
    );
    assert!(!target.path().join("Sounds").exists());
}

#[tokio::test]
async fn test_reconcile_missing_source_fails() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let classifier = default_classifier();
    let versioned = parse_range(">=1.1").unwrap();
    let reconciler = Reconciler::new(source.path(), target.path(), &classifier, &versioned);

    let err = reconciler
        .reconcile(&branch("1.1"), &[PathBuf::from("gone.txt")])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("gone.txt"));
}

// --- Options ---

#[test]
fn test_options_defaults() {
    let options = MergeOptions::builder()
        .with_source("/mods/doors")
        .with_target("/games/RimWorld/Mods/Doors")
        .build();
    assert_eq!(options.source(), Path::new("/mods/doors"));
    assert_eq!(options.target(), Path::new("/games/RimWorld/Mods/Doors"));
    assert!(options.include.is_empty());
    assert!(!options.debug);
    assert_eq!(options.config.versioned, ">=1.1");
}
