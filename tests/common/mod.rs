//! Shared test helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a cutplan command
pub fn cutplan() -> Command {
    Command::new(cargo::cargo_bin!("cutplan"))
}

/// Write a cut-list YAML file into the temp dir and return its path
pub fn write_cutlist(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, yaml).unwrap();
    path
}

/// Path for a throwaway history database inside the temp dir
pub fn db_path(tmp: &TempDir) -> PathBuf {
    tmp.path().join("history.db3")
}

/// A simple two-panel cut list used across tests
pub const TWO_PANELS: &str = "
parts:
  - name: Panel
    width: 1000
    height: 500
    quantity: 2
";

/// A wardrobe-side cut list for history/predict tests
pub const WARDROBE_SIDES: &str = "
parts:
  - name: Side
    width: 600
    height: 1100
    quantity: 2
    edge: long2
";
