use assert_cmd::Command;
use predicates::prelude::*;

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("mcp-time").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--local-timezone"))
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--transport"));
}

/// Test CLI version output
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("mcp-time").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_non_numeric_port() {
    let mut cmd = Command::cargo_bin("mcp-time").unwrap();
    cmd.args(["--port", "eighty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--port"));
}

#[test]
fn test_rejects_unknown_transport() {
    let mut cmd = Command::cargo_bin("mcp-time").unwrap();
    cmd.args(["--transport", "carrier-pigeon"]).assert().failure();
}
