use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    Command::cargo_bin("worklog")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("dates"))
        .stdout(predicate::str::contains("team"));
}

#[test]
fn version_is_reported() {
    Command::cargo_bin("worklog")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("worklog"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("worklog")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
