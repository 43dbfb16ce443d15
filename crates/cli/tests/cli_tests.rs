use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("sitepilot").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("wizard"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn serve_help_shows_defaults() {
    let mut cmd = Command::cargo_bin("sitepilot").unwrap();
    cmd.args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4700"))
        .stdout(predicate::str::contains("127.0.0.1"));
}
