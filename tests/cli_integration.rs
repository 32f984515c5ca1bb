//! Integration tests for the PwVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.  The
//! passphrase is supplied through `PWVAULT_PASSWORD` and a project-local
//! `.pwvault.toml` lowers the Argon2 cost so each run stays quick.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the pwvault binary.
fn pwvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("pwvault").expect("binary should exist")
}

/// Helper: a temp project dir with cheap KDF settings.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".pwvault.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    tmp
}

/// Helper: pwvault running inside `dir` with a passphrase set.
fn pwvault_in(dir: &TempDir, passphrase: &str) -> Command {
    let mut cmd = pwvault();
    cmd.current_dir(dir.path()).env("PWVAULT_PASSWORD", passphrase);
    cmd
}

#[test]
fn help_flag_shows_usage() {
    pwvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local passphrase-encrypted password vault"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("save-as"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag_shows_version() {
    pwvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pwvault"));
}

#[test]
fn no_args_shows_help() {
    pwvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn add_then_list_round_trip() {
    let tmp = project();

    pwvault_in(&tmp, "secret")
        .args(["add", "alice", "--password", "hunter-Q1", "--note", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'alice'"));

    tmp.child("passwords").assert(predicate::path::exists());
    tmp.child("passwords.bak").assert(predicate::path::exists());

    pwvault_in(&tmp, "secret")
        .args(["list", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("hunter-Q1"))
        .stdout(predicate::str::contains("work"));

    pwvault_in(&tmp, "secret")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("hunter-Q1").not());
}

#[test]
fn duplicate_add_is_ignored() {
    let tmp = project();
    for _ in 0..2 {
        pwvault_in(&tmp, "secret")
            .args(["add", "bob", "-p", "hunter-Q2"])
            .assert()
            .success();
    }

    pwvault_in(&tmp, "secret")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entry"));
}

#[test]
fn wrong_passphrase_is_reported() {
    let tmp = project();
    pwvault_in(&tmp, "right")
        .args(["add", "alice", "-p", "hunter-Q1"])
        .assert()
        .success();

    pwvault_in(&tmp, "wrong")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not decrypt"));
}

#[test]
fn remove_with_force_deletes_entry() {
    let tmp = project();
    pwvault_in(&tmp, "secret")
        .args(["add", "alice", "-p", "hunter-Q1"])
        .assert()
        .success();

    pwvault_in(&tmp, "secret")
        .args(["remove", "alice", "hunter-Q1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 entry"));

    // Last entry gone: the file is truncated to zero bytes.
    let len = std::fs::metadata(tmp.child("passwords").path()).unwrap().len();
    assert_eq!(len, 0);
}

#[test]
fn save_as_uses_requested_cipher() {
    let tmp = project();
    pwvault_in(&tmp, "secret")
        .args(["add", "alice", "-p", "hunter-Q1"])
        .assert()
        .success();

    pwvault_in(&tmp, "secret")
        .args(["--algo", "xchacha20-poly1305", "save-as", "copy.vault"])
        .assert()
        .success()
        .stdout(predicate::str::contains("XCHACHA20-POLY1305"));

    pwvault_in(&tmp, "secret")
        .args(["--file", "copy.vault", "list", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter-Q1"));
}

#[test]
fn unknown_algorithm_rejected() {
    pwvault()
        .args(["--algo", "TWOFISH", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TWOFISH"));
}

#[test]
fn generate_prints_password() {
    pwvault()
        .args(["generate", "--length", "24"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| out.trim_end().len() == 24));
}

#[test]
fn algorithms_lists_identifiers() {
    pwvault()
        .arg("algorithms")
        .assert()
        .success()
        .stdout(predicate::str::contains("AES256-GCM"))
        .stdout(predicate::str::contains("SHA512"))
        .stdout(predicate::str::contains("ZLIB"));
}

#[test]
fn file_env_var_selects_vault() {
    let tmp = project();
    pwvault_in(&tmp, "secret")
        .env("PWVAULT_FILE", "team.vault")
        .args(["add", "carol", "-p", "hunter-Q3"])
        .assert()
        .success();

    tmp.child("team.vault").assert(predicate::path::exists());
    tmp.child("passwords").assert(predicate::path::missing());
}

#[test]
fn add_reads_password_from_stdin() {
    let tmp = project();
    pwvault_in(&tmp, "secret")
        .args(["add", "dave"])
        .write_stdin("hunter-Q4\n")
        .assert()
        .success();

    pwvault_in(&tmp, "secret")
        .args(["list", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hunter-Q4"));
}

#[test]
fn add_rejects_empty_stdin_password() {
    let tmp = project();
    pwvault_in(&tmp, "secret")
        .args(["add", "dave"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no password for 'dave' on stdin"));

    tmp.child("passwords").assert(predicate::path::missing());
}
