//! Config files on disk and the command-line surface

use std::fs;

use assert_cmd::Command;
use conduit_grid::config::EXAMPLE_CONFIG;
use conduit_grid::{Config, ConfigError, GridLayoutConfig};
use predicates::prelude::*;

#[test]
fn test_config_file_overrides_grid_and_branch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("grid.toml");
    fs::write(
        &path,
        "[grid]\nmin_column_width = 24\nmax_columns = 3\n\n[branch]\nmax_collapsed_lines = 5\n",
    )
    .expect("write config");

    let config = Config::read_from(&path).expect("valid config");
    assert_eq!(config.grid.min_column_width, 24);
    assert_eq!(config.grid.max_columns, 3);
    assert_eq!(
        config.grid.preferred_column_width,
        GridLayoutConfig::default().preferred_column_width
    );
    assert_eq!(config.branch.max_collapsed_lines, 5);
}

#[test]
fn test_missing_file_is_an_io_error_when_read_strictly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Config::read_from(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_invalid_file_falls_back_when_loaded_leniently() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("grid.toml");
    fs::write(&path, "[grid]\nmax_columns = 0\n").expect("write config");

    assert!(Config::read_from(&path).is_err());
    assert_eq!(Config::load_from(&path).grid, GridLayoutConfig::default());
}

#[test]
fn test_print_default_config() {
    Command::cargo_bin("conduit-grid")
        .expect("binary")
        .arg("--print-default-config")
        .assert()
        .success()
        .stdout(EXAMPLE_CONFIG);
}

#[test]
fn test_help_lists_grid_flags() {
    Command::cargo_bin("conduit-grid")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--min-column-width"))
        .stdout(predicate::str::contains("--max-columns"));
}
