//! # ScholarMatch CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies top-level behavior of the `scholarmatch` binary: standard flags
//! and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    scholarmatch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chat")
                .and(predicate::str::contains("classify"))
                .and(predicate::str::contains("check-email")),
        );
}

#[test]
fn test_version_flag() {
    scholarmatch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    scholarmatch_cmd().assert().failure();
}
