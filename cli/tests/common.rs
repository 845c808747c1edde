//! # ScholarMatch CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs` file in
//! that directory (other than this module) is compiled as a separate test
//! crate and runs the compiled `scholarmatch` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// # Get ScholarMatch Command (`scholarmatch_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `scholarmatch` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn scholarmatch_cmd() -> Command {
    Command::cargo_bin("scholarmatch").expect("Failed to find scholarmatch binary for testing")
}

/// Writes `contents` to a `chat.toml` inside a fresh temporary directory.
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir for config");
    let path = dir.path().join("chat.toml");
    fs::write(&path, contents).expect("Failed to write temp config");
    (dir, path)
}
