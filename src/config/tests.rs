// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::loader::ConfigSource;
use super::{Config, ConfigLoader};
use crate::config::types::{BuildConfiguration, FolderRule};
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert!(!config.global.dry);
    assert!(!config.global.debug);
    assert_eq!(config.global.output_log_level, LogLevel::Info);
    assert_eq!(config.global.log_file, None);
    assert_eq!(config.merge.manifest, "About/About.xml");
    assert_eq!(config.merge.versioned, ">=1.1");
    assert_eq!(config.build.configuration, BuildConfiguration::Debug);
}

#[test]
fn test_default_rules() {
    let rules = Config::default().merge.rules;
    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules[0],
        FolderRule::new("=1.0", &["Assemblies", "Defs", "Patches"])
    );
    assert_eq!(rules[1].versions, ">=1.1");
    assert!(rules[1].folders.contains(&"Textures".to_string()));
}

#[test]
fn test_build_configuration_parse() {
    assert_eq!(
        "debug".parse::<BuildConfiguration>().unwrap(),
        BuildConfiguration::Debug
    );
    assert_eq!(
        "Release".parse::<BuildConfiguration>().unwrap(),
        BuildConfiguration::Release
    );
    let err = "RelWithDebInfo".parse::<BuildConfiguration>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'configuration' in section '[build]': expected 'Debug' or 'Release', got 'RelWithDebInfo'");
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
debug = true
output_log_level = 4
log_file = "logs/mod.log"

[merge]
versioned = ">=1.2"

[[merge.rules]]
versions = ">=1.0"
folders = ["Defs"]

[build]
dotnet = "/usr/bin/dotnet"
configuration = "Release"
"#,
    )
    .unwrap();

    assert!(config.global.debug);
    assert_eq!(config.global.output_log_level, LogLevel::Debug);
    assert_eq!(config.global.log_file, Some(PathBuf::from("logs/mod.log")));
    assert_eq!(config.merge.versioned, ">=1.2");
    assert_eq!(config.merge.rules, vec![FolderRule::new(">=1.0", &["Defs"])]);
    assert_eq!(config.merge.manifest, "About/About.xml");
    assert_eq!(config.build.dotnet, PathBuf::from("/usr/bin/dotnet"));
    assert_eq!(config.build.configuration, BuildConfiguration::Release);
}

#[test]
fn test_invalid_rule_range_is_rejected() {
    let err = Config::parse(
        r#"
[[merge.rules]]
versions = "not a range"
folders = ["Defs"]
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("not a range"), "{err}");
}

#[test]
fn test_bare_version_rule_is_rejected() {
    let err = Config::parse(
        r#"
[[merge.rules]]
versions = "1.0"
folders = ["Defs"]
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("'=1.0'"), "{err}");
}

#[test]
fn test_deny_unknown_fields_top_level() {
    assert!(Config::parse("[paths]\nprefix = \"/x\"").is_err());
}

#[test]
fn test_config_loader_format_loaded_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[global]\ndry = true")
        .add_toml_file_optional("/nonexistent/mod.toml");
    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @"1. [inline]");
}

#[test]
fn test_config_loader_add_toml_file_success() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(
        file,
        r#"
[global]
dry = true

[build]
configuration = "Release"
"#
    )
    .expect("failed to write temp file");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .build()
        .expect("build should succeed");

    assert!(config.global.dry);
    assert_eq!(config.build.configuration, BuildConfiguration::Release);
    assert_eq!(ConfigLoader::new().add_toml_file(file.path()).loaded_files().len(), 1);
}

#[test]
fn test_config_loader_add_toml_file_not_found() {
    let loader = ConfigLoader::new().add_toml_file("/nonexistent/path/to/mod.toml");
    assert!(loader.build().is_err());
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: This test runs in isolation (nextest runs each test in its own process)
    unsafe {
        std::env::set_var("MODTEST_GLOBAL__DEBUG", "true");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[global]\n debug = false")
        .with_env_prefix("MODTEST")
        .build()
        .expect("build should succeed");

    assert!(config.global.debug, "env var should override TOML value");

    // SAFETY: Same as above
    unsafe {
        std::env::remove_var("MODTEST_GLOBAL__DEBUG");
    }
}

#[test]
fn test_env_multi_word_key() {
    // SAFETY: unique prefix, no other test reads it
    unsafe {
        std::env::set_var("MODLEVEL_GLOBAL__OUTPUT_LOG_LEVEL", "4");
    }
    let config = ConfigLoader::new().with_env_prefix("MODLEVEL").build().unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::Debug);
    // SAFETY: same as above
    unsafe {
        std::env::remove_var("MODLEVEL_GLOBAL__OUTPUT_LOG_LEVEL");
    }
}

#[test]
fn test_config_loader_set_override() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\n dry = false")
        .set("global.dry", true)
        .expect("set should succeed")
        .build()
        .expect("build should succeed");

    assert!(config.global.dry, "set override should take effect");
}

#[test]
fn test_config_loader_apply_overrides() {
    let config = ConfigLoader::new()
        .apply_overrides(&["global/debug=true", "merge/versioned = >=1.3"])
        .unwrap()
        .build()
        .unwrap();
    assert!(config.global.debug);
    assert_eq!(config.merge.versioned, ">=1.3");
}

#[test]
fn test_config_loader_apply_overrides_rejects_malformed() {
    assert!(ConfigLoader::new().apply_overrides(&["debug=true"]).is_err());
    assert!(ConfigLoader::new().apply_overrides(&["global/debug"]).is_err());
}

#[test]
fn test_format_options_deterministic() {
    let options = Config::default().format_options();
    assert_eq!(options, Config::default().format_options());
    assert!(options.iter().any(|l| l.starts_with("build.configuration") && l.ends_with("= Debug")));
    assert!(options.iter().any(|l| l.starts_with("merge.rules.0") && l.contains("=1.0 -> Assemblies")));
}

#[test]
fn test_layered_ini_then_overrides() {
    let temp = tempfile::tempdir().unwrap();
    let ini = temp.path().join("release.toml");
    std::fs::write(&ini, "[global]\ndebug = true\n\n[build]\nconfiguration = \"Release\"\n").unwrap();

    let loader = ConfigLoader::layered(&[&ini], &["build/configuration=Debug"]).unwrap();
    assert_eq!(loader.loaded_files().last(), Some(&ConfigSource::Ini(ini.clone())));

    let config = loader.build().unwrap();
    assert!(config.global.debug);
    assert_eq!(config.build.configuration, BuildConfiguration::Debug);
}

#[test]
fn test_layered_rejects_bad_override() {
    let err = ConfigLoader::layered::<PathBuf, _>(&[], &["debug"]).err().unwrap();
    assert!(err.to_string().contains("section/key=value"));
}
