//! CLI integration tests for the dsctl binary.
//!
//! These only cover paths that terminate before any network call:
//! configuration errors, input errors, and spec errors with an
//! operator-supplied token.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dsctl").unwrap();
    cmd.env("CONSOLE_ORGANIZATION_ID", "CONSOLE_ID")
        .env("CONSOLE_API_KEY", "api-key");
    cmd
}

#[test]
fn fails_without_required_environment() {
    cmd()
        .env_remove("CONSOLE_ORGANIZATION_ID")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONSOLE_ORGANIZATION_ID"));
}

#[test]
fn fails_without_api_key() {
    cmd()
        .env_remove("CONSOLE_API_KEY")
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONSOLE_API_KEY"));
}

#[test]
fn rejects_invalid_json_on_stdin() {
    // --token skips the token fetch, so this exits before any network call.
    cmd()
        .args(["--token", "abcd"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn rejects_a_document_with_a_bad_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schema.json");
    fs::write(
        &path,
        r#"{"self": {"vendor": "com.snowplow", "name": "transaction", "format": "jsonschema", "version": "incorrect"}}"#,
    )
    .unwrap();

    cmd()
        .args(["--token", "abcd", "--file", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "vendor, name, format or version is invalid",
        ));
}

#[test]
fn rejects_a_document_without_a_self_element() {
    cmd()
        .args(["--token", "abcd"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'self' element"));
}

#[test]
fn rejects_an_unknown_document_type_at_the_cli() {
    cmd()
        .args(["--token", "abcd", "--type", "thing"])
        .write_stdin("{}")
        .assert()
        .failure();
}

#[test]
fn help_lists_the_promotion_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--promote-to-dev"))
        .stdout(predicate::str::contains("--promote-to-prod"))
        .stdout(predicate::str::contains("--allow-patch"));
}
