// modbuild-rs: Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, TaskSpan, create_log_file};
use std::path::Path;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(0).unwrap(), LogLevel::Silent);
    assert_eq!(LogLevel::new(6).unwrap(), LogLevel::Dump);
    let err = LogLevel::new(7).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7");
}

#[test]
fn test_log_level_directives() {
    assert_eq!(LogLevel::Silent.directives(), "off");
    assert_eq!(LogLevel::Error.directives(), "error");
    insta::assert_snapshot!(LogLevel::Info.directives(), @"warn,modbuild_rs=info,mod=info");
    insta::assert_snapshot!(LogLevel::Trace.directives(), @"info,modbuild_rs=trace,mod=trace");
    assert_eq!(LogLevel::Dump.directives(), "trace");
}

#[test]
fn test_log_level_ordering() {
    assert!(LogLevel::Debug > LogLevel::Info);
    assert_eq!(LogLevel::from_u8(4), Some(LogLevel::Debug));
    assert_eq!(LogLevel::Trace.as_u8(), 5);
    assert_eq!(LogLevel::from_u8(9), None);
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("5").unwrap();
    assert_eq!(ok, LogLevel::Trace);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
    assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "2");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::builder().build();
    assert_eq!(config.console_level(), LogLevel::Info);
    assert_eq!(config.file_level(), LogLevel::Trace);
    assert!(config.log_file().is_none());

    let config = LogConfig::builder().with_log_file("logs/mod.log").build();
    assert_eq!(config.log_file(), Some(Path::new("logs/mod.log")));
}

#[test]
fn test_create_log_file_makes_parents() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("logs/nested/mod.log");
    create_log_file(&path).unwrap();
    assert!(path.is_file());
}

#[test]
fn test_task_span_tracks_name() {
    let task = TaskSpan::start("merge versions");
    assert_eq!(task.name(), "merge versions");
    task.inform("1.0: merging 3 files");
    task.success("1.0");
}
