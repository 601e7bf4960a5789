// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::{CommandRunner, ExecutionMode, GitRunner, Identity, split_lines};
use crate::core::env::container::Env;
use crate::error::GitError;
use crate::git::context::ExecutionContext;
use crate::git::invocation::Invocation;

fn context(dir: &std::path::Path) -> ExecutionContext {
    ExecutionContext::inherit(dir)
}

fn identity_runner() -> GitRunner {
    GitRunner::builder()
        .identity(Identity::new("Runner Name", "runner@example.com"))
        .build()
}

#[test]
fn test_split_lines_whitespace_only_is_empty() {
    assert!(split_lines("").is_empty());
    assert!(split_lines("\n\n  \n").is_empty());
    assert!(split_lines(" \t\r\n").is_empty());
}

#[test]
fn test_split_lines_trims_trailing_blank_lines() {
    assert_eq!(split_lines("a\nb\n\n\n"), vec!["a", "b"]);
    assert_eq!(split_lines(" leading space kept\n"), vec![" leading space kept"]);
}

#[test]
fn test_effective_config_defaults() {
    let runner = GitRunner::builder().build();
    let invocation = Invocation::in_dir("/tmp", "status");
    insta::assert_debug_snapshot!(runner.effective_config(&invocation), @r#"
    {
        "protocol.file.allow": "always",
        "submodule.recurse": "false",
    }
    "#);
}

#[test]
fn test_effective_config_offload_and_identity() {
    let runner = GitRunner::builder()
        .identity(Identity::new("Dev", "dev@example.com"))
        .offload(true)
        .build();
    let invocation = Invocation::in_dir("/tmp", "fetch");
    let config = runner.effective_config(&invocation);
    assert_eq!(config.get("fetch.uriprotocols").map(String::as_str), Some("https"));
    assert_eq!(config.get("user.name").map(String::as_str), Some("Dev"));
    assert_eq!(config.get("user.email").map(String::as_str), Some("dev@example.com"));
}

#[test]
fn test_per_call_config_wins_over_injected_values() {
    let mut extra = BTreeMap::new();
    extra.insert("core.autocrlf".to_string(), "input".to_string());
    extra.insert("submodule.recurse".to_string(), "maybe".to_string());
    let runner = GitRunner::builder()
        .identity(Identity::new("Runner Name", "runner@example.com"))
        .config(extra)
        .build();
    let invocation = Invocation::in_dir("/tmp", "commit")
        .config("user.name", "Call Name")
        .config("submodule.recurse", "true");

    let config = runner.effective_config(&invocation);
    assert_eq!(config["user.name"], "Call Name");
    assert_eq!(config["user.email"], "runner@example.com");
    assert_eq!(config["submodule.recurse"], "true");
    assert_eq!(config["core.autocrlf"], "input");
}

#[test]
fn test_environment_layers_over_base_env() {
    let mut base = Env::new();
    base.set("PATH", "/usr/bin");
    base.set("GIT_AUTHOR_NAME", "from base");
    let ctx = ExecutionContext::new("/tmp", base);
    let invocation = Invocation::new(&ctx, "status");

    let env = identity_runner().environment(&ctx, &invocation, ExecutionMode::Captured);
    assert_eq!(env.get("PATH"), Some("/usr/bin"));
    assert_eq!(env.get("GIT_AUTHOR_NAME"), Some("Runner Name"));
    assert_eq!(env.get("GIT_COMMITTER_EMAIL"), Some("runner@example.com"));
    assert_eq!(env.get("GIT_TERMINAL_PROMPT"), Some("0"));
    assert_eq!(env.get("GIT_CONFIG_COUNT"), Some("4"));
    assert_eq!(env.get("GIT_CONFIG_KEY_0"), Some("protocol.file.allow"));
    // base env is untouched
    assert_eq!(ctx.base_env().get("GIT_AUTHOR_NAME"), Some("from base"));
}

#[test]
fn test_interactive_environment_allows_prompts() {
    let ctx = ExecutionContext::new("/tmp", Env::new());
    let invocation = Invocation::new(&ctx, "commit");
    let env = GitRunner::builder()
        .build()
        .environment(&ctx, &invocation, ExecutionMode::Interactive);
    assert_eq!(env.get("GIT_TERMINAL_PROMPT"), None);
}

#[tokio::test]
async fn test_empty_verb_is_invalid_invocation() {
    let temp = tempfile::tempdir().expect("temp dir");
    let ctx = context(temp.path());
    let invocation = Invocation::new(&ctx, "  ").arg("--version");

    let err = GitRunner::builder()
        .build()
        .execute(&ctx, &invocation, ExecutionMode::Silent)
        .await
        .expect_err("empty verb must be rejected");
    assert!(matches!(err, GitError::InvalidInvocation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_injected_config_reaches_git() {
    let temp = tempfile::tempdir().expect("temp dir");
    let ctx = context(temp.path());
    let runner = identity_runner();

    let invocation = Invocation::new(&ctx, "config").args(["--get", "protocol.file.allow"]);
    let lines = runner
        .execute_lines(&ctx, &invocation)
        .await
        .expect("git config should succeed");
    assert_eq!(lines, vec!["always"]);

    let invocation = Invocation::new(&ctx, "config")
        .args(["--get", "user.name"])
        .config("user.name", "Per Call");
    let lines = runner
        .execute_lines(&ctx, &invocation)
        .await
        .expect("git config should succeed");
    assert_eq!(lines, vec!["Per Call"]);
}

#[tokio::test]
async fn test_non_zero_exit_keeps_diagnostics() {
    let temp = tempfile::tempdir().expect("temp dir");
    let ctx = context(temp.path());
    let invocation = Invocation::new(&ctx, "rev-parse").arg("--verify").arg("refs/heads/nope");

    let err = GitRunner::builder()
        .build()
        .execute(&ctx, &invocation, ExecutionMode::Silent)
        .await
        .expect_err("rev-parse outside a repository fails");

    let failure = err.as_execution().expect("execution failure");
    assert_eq!(failure.exit_code(), Some(128));
    assert_eq!(failure.args(), ["rev-parse", "--verify", "refs/heads/nope"]);
    assert!(!failure.stderr().is_empty());
    assert_eq!(failure.working_dir(), &temp.path().to_path_buf());
}

#[tokio::test]
async fn test_missing_executable_is_execution_failure() {
    let temp = tempfile::tempdir().expect("temp dir");
    let ctx = context(temp.path());
    let invocation = Invocation::new(&ctx, "status");

    let err = GitRunner::builder()
        .executable("/nonexistent/bin/git-12345")
        .build()
        .execute(&ctx, &invocation, ExecutionMode::Captured)
        .await
        .expect_err("spawn should fail");
    let failure = err.as_execution().expect("execution failure");
    assert_eq!(failure.exit_code(), None);
}

#[tokio::test]
async fn test_silent_mode_returns_no_lines() {
    let temp = tempfile::tempdir().expect("temp dir");
    let ctx = context(temp.path());
    let invocation = Invocation::new(&ctx, "version");

    let result = GitRunner::builder()
        .build()
        .execute(&ctx, &invocation, ExecutionMode::Silent)
        .await
        .expect("git version should succeed");
    assert!(result.stdout().is_empty());
    assert_eq!(result.exit_code(), 0);
}
