//! Integration test suite for quill.
//!
//! Exercises the CLI surface end to end without touching the network:
//! help output, argument validation, and the failure paths that terminate
//! before any collaborator is contacted.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```

use assert_cmd::Command;
use predicates::prelude::*;

fn quill() -> Command {
    Command::cargo_bin("quill").unwrap()
}

#[test]
fn top_level_help_names_self_subcommand() {
    quill()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("self"));
}

#[test]
fn self_update_help_documents_version_and_preview() {
    quill()
        .args(["self", "update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VERSION"))
        .stdout(predicate::str::contains("--preview"));
}

#[test]
fn version_flag_reports_crate_version() {
    quill()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn invalid_constraint_fails_before_any_network_access() {
    quill()
        .args(["self", "update", "not-a-version"])
        .env("QUILL_HOME", "/nonexistent-quill-home")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid version constraint"));
}

#[test]
fn verbose_and_quiet_are_mutually_exclusive() {
    // Parsing fails before the command runs, so nothing is contacted.
    quill()
        .args(["--verbose", "--quiet", "self", "update"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    quill().arg("frobnicate").assert().failure();
}
