// tests/cli_tests.rs
// CLI surface tests. Nothing here reaches a network: every scenario fails
// before the first request (usage errors, credential errors).

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("mmpipe").unwrap()
}

#[test]
fn test_missing_server_url_is_fatal() {
    cmd()
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SERVER_URL"));
}

#[test]
fn test_missing_channel_is_fatal() {
    cmd()
        .arg("https://chat.example.com")
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CHANNEL"));
}

#[test]
fn test_help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--team"))
        .stdout(predicate::str::contains("--update"))
        .stdout(predicate::str::contains("SERVER_URL"))
        .stdout(predicate::str::contains("CHANNEL"));
}

#[test]
fn test_missing_netrc_fails_before_any_request() {
    let home = tempfile::tempdir().unwrap();
    cmd()
        .env("HOME", home.path())
        .args(["https://chat.example.com", "town-square"])
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials"))
        .stderr(predicate::str::contains(".netrc"));
}

#[test]
fn test_netrc_without_mattermost_entry_fails() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join(".netrc"),
        "machine github login alice password a1\n",
    )
    .unwrap();

    cmd()
        .env("HOME", home.path())
        .args(["https://chat.example.com", "town-square"])
        .write_stdin("hello\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mattermost"));
}
