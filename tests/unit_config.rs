// tests/unit_config.rs
use std::fs;
use std::path::PathBuf;

use gatex_core::config::{Config, EngineConfig};
use gatex_core::edit::{ConstraintScope, EditMode, Strategy};
use gatex_core::GatexError;

#[test]
fn test_defaults() {
    let e = EngineConfig::default();
    assert_eq!(e.strategy, Strategy::Exact);
    assert_eq!(e.mode, EditMode::Edit);
    assert_eq!(e.constraints, ConstraintScope::Lazy);
    assert_eq!(e.threads, 0);
    assert_eq!(e.time_limit_secs, 0);
    assert_eq!(Config::new().report.path, PathBuf::from("gatex-report.txt"));
}

#[test]
fn test_parse_toml() {
    let c = Config::parse_toml(
        "[engine]\nstrategy = \"heuristic\"\nmode = \"delete\"\nconstraints = \"exhaustive\"\nthreads = 2\n\n[report]\npath = \"out.txt\"\n",
    )
    .unwrap();
    assert_eq!(c.engine.strategy, Strategy::Heuristic);
    assert_eq!(c.engine.mode, EditMode::Delete);
    assert_eq!(c.engine.constraints, ConstraintScope::Exhaustive);
    assert_eq!(c.engine.threads, 2);
    assert_eq!(c.report.path, PathBuf::from("out.txt"));
}

#[test]
fn test_partial_sections_keep_defaults() {
    let c = Config::parse_toml("[engine]\ntime_limit_secs = 30\n").unwrap();
    assert_eq!(c.engine.mode, EditMode::Edit);
    assert_eq!(c.engine.time_limit_secs, 30);
    assert_eq!(c.report.path, PathBuf::from("gatex-report.txt"));
}

#[test]
fn test_unknown_mode_is_config_error() {
    let err = Config::parse_toml("[engine]\nmode = \"sideways\"\n").unwrap_err();
    assert!(matches!(err, GatexError::Config(_)));
    assert!(err.is_input_error());
}

#[test]
fn test_heuristic_add_rejected() {
    let c = Config::parse_toml("[engine]\nstrategy = \"heuristic\"\nmode = \"add\"\n").unwrap();
    assert!(matches!(c.validate(), Err(GatexError::Config(_))));
}

#[test]
fn test_load_explicit_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("custom.toml");
    fs::write(&path, "[engine]\nmode = \"add\"").unwrap();
    let c = Config::load(Some(&path)).unwrap();
    assert_eq!(c.engine.mode, EditMode::Add);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let d = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&d.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, GatexError::Io { .. }));
}

#[test]
fn test_to_toml_reparses() {
    let mut c = Config::new();
    c.engine.mode = EditMode::Delete;
    c.engine.threads = 3;
    let text = c.to_toml().unwrap();
    let back = Config::parse_toml(&text).unwrap();
    assert_eq!(back.engine, c.engine);
    assert_eq!(back.report, c.report);
}
