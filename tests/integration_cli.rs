// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the command line.
//!
//! Parses realistic argument patterns and runs the built binary against
//! temporary repositories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use clap::Parser;
use gitdrive::cli::{Cli, Command as CliCommand};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn gitdrive(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gitdrive"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("gitdrive should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn run_git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(["-c", "protocol.file.allow=always"])
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo_with_commit(dir: &Path, file: &str) {
    fs::create_dir_all(dir).unwrap();
    run_git(&["init", "-q", "--initial-branch=main"], dir);
    fs::write(dir.join(file), "content\n").unwrap();
    run_git(&["add", "."], dir);
    run_git(&["commit", "-q", "-m", "initial"], dir);
}

/// Superproject with the given submodules, cloned to `<root>/checkout`.
fn superproject(root: &Path, libs: &[&str]) {
    let upstream = root.join("upstream");
    init_repo_with_commit(&upstream, "README.md");
    for lib in libs {
        let lib_dir = root.join("libs").join(lib);
        init_repo_with_commit(&lib_dir, &format!("{lib}.txt"));
        let url = lib_dir.to_string_lossy().to_string();
        run_git(&["submodule", "add", "-q", &url, &format!("libs/{lib}")], &upstream);
    }
    run_git(&["commit", "-q", "-m", "add submodules"], &upstream);
    run_git(&["clone", "-q", "upstream", "checkout"], root);
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_sync_with_global_options() {
    let cli = Cli::try_parse_from([
        "gitdrive",
        "-C",
        "super",
        "--set",
        "git.offload=true",
        "sync",
        "-j",
        "8",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(CliCommand::Sync(ref args)) if args.jobs == Some(8)));
    assert_eq!(cli.global.options, ["git.offload=true"]);
}

#[test]
fn cli_exec_interactive() {
    let cli = Cli::try_parse_from(["gitdrive", "exec", "-i", "commit", "--amend"]).unwrap();
    let Some(CliCommand::Exec(args)) = cli.command else {
        panic!("expected exec");
    };
    assert!(args.interactive);
    assert_eq!(args.args, ["commit", "--amend"]);
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn binary_version() {
    let dir = temp_dir();
    let output = gitdrive(&["version"], dir.path());
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn binary_config_env() {
    let dir = temp_dir();
    let output = gitdrive(&["config-env", "b.key=2", "a.key=1"], dir.path());
    assert!(output.status.success());
    insta::assert_snapshot!(stdout(&output).trim(), @r"
    GIT_CONFIG_COUNT=2
    GIT_CONFIG_KEY_0=a.key
    GIT_CONFIG_VALUE_0=1
    GIT_CONFIG_KEY_1=b.key
    GIT_CONFIG_VALUE_1=2
    ");
}

#[test]
fn binary_options_layering() {
    let dir = temp_dir();
    fs::write(
        dir.path().join("gitdrive.toml"),
        "[git]\nsubmodule_jobs = 4\noffload = false\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gitdrive"))
        .args(["--set", "git.offload=true", "options"])
        .current_dir(dir.path())
        .env("GITDRIVE_GIT__SUBMODULE_JOBS", "8")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    let value = |key: &str| {
        text.lines()
            .find(|line| line.starts_with(key))
            .and_then(|line| line.split_once(" = "))
            .map(|(_, value)| value.to_string())
    };
    assert_eq!(value("git.submodule_jobs").as_deref(), Some("8"));
    assert_eq!(value("git.offload").as_deref(), Some("true"));
}

#[test]
fn binary_inis_lists_local_file() {
    let dir = temp_dir();
    fs::write(dir.path().join("gitdrive.toml"), "").unwrap();
    let output = gitdrive(&["inis"], dir.path());
    assert!(output.status.success());
    assert!(stdout(&output).contains("gitdrive.toml"));
}

#[test]
fn binary_invalid_config_fails() {
    let dir = temp_dir();
    let output = gitdrive(&["--set", "git.submodule_jobs=0", "options"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error:"));
    assert!(stderr(&output).contains("submodule_jobs"));
}

#[test]
fn binary_missing_directory_fails() {
    let dir = temp_dir();
    let output = gitdrive(&["-C", "does-not-exist", "status"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn binary_exec_prints_git_output() {
    let dir = temp_dir();
    init_repo_with_commit(dir.path(), "a.txt");
    let output = gitdrive(&["exec", "rev-parse", "--abbrev-ref", "HEAD"], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "main");
}

#[test]
fn binary_exec_failure_exits_one() {
    let dir = temp_dir();
    init_repo_with_commit(dir.path(), "a.txt");
    let output = gitdrive(&["exec", "checkout", "no-such-branch"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no-such-branch"));
}

#[test]
fn binary_tracking() {
    let dir = temp_dir();
    init_repo_with_commit(dir.path(), "a.txt");
    run_git(&["branch", "topic"], dir.path());
    run_git(&["config", "branch.topic.remote", "."], dir.path());
    run_git(&["config", "branch.topic.merge", "refs/heads/main"], dir.path());
    run_git(&["config", "branch.main.remote", "origin"], dir.path());
    run_git(&["config", "branch.main.merge", "refs/heads/trunk"], dir.path());

    let output = gitdrive(&["tracking", "topic"], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "trunk");

    let output = gitdrive(&["tracking", "topic", "--chain"], dir.path());
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        ["topic -> main (local)", "main -> origin/trunk"]
    );
}

#[test]
fn binary_sync_and_status() {
    let dir = temp_dir();
    superproject(dir.path(), &["a", "b"]);

    let output = gitdrive(&["-C", "checkout", "status", "--json"], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.as_array().map(Vec::len), Some(2));
    assert_eq!(entries[0]["state"], "uninitialized");
    assert_eq!(entries[0]["path"], "libs/a");

    let output = gitdrive(&["-C", "checkout", "sync", "--jobs", "2"], dir.path());
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("2 of 2 submodule(s) synchronized"));
    assert!(dir.path().join("checkout/libs/b/b.txt").exists());

    let output = gitdrive(&["-C", "checkout", "sync"], dir.path());
    assert_eq!(stdout(&output).trim(), "all submodules are initialized");
}

#[test]
fn binary_sync_failure_reports_json_and_exits_one() {
    let dir = temp_dir();
    superproject(dir.path(), &["ok", "gone"]);
    fs::remove_dir_all(dir.path().join("libs/gone")).unwrap();

    let output = gitdrive(&["-C", "checkout", "sync", "--json"], dir.path());
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["attempted"], 2);
    assert_eq!(report["succeeded"], serde_json::json!(["libs/ok"]));
    assert!(report["failed"]["libs/gone"].is_string());
    assert!(stderr(&output).contains("1 of 2 submodule(s) failed to sync"));
}
