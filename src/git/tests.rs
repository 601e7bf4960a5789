// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;

use crate::core::env::container::Env;
use crate::error::GitError;
use crate::git::config_env::{COUNT_VAR, encode_config_env};
use crate::git::context::ExecutionContext;
use crate::git::invocation::Invocation;
use crate::git::ops;
use crate::git::options::{
    BranchOptions, CheckoutOptions, CloneOptions, CommitOptions, FetchOptions, PushOptions,
    SubmoduleUpdateOptions,
};
use crate::git::test_utils::{ScriptedRunner, context, exit, joined, lines, ok};

fn render(env: &Env) -> String {
    env.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// --- config_env ---

#[test]
fn test_encode_empty_input_yields_only_count() {
    let env = encode_config_env(Vec::<(String, String)>::new());
    insta::assert_snapshot!(render(&env), @"GIT_CONFIG_COUNT=0");
}

#[test]
fn test_encode_indices_follow_sorted_keys() {
    let env = encode_config_env([
        ("submodule.recurse", "false"),
        ("protocol.file.allow", "always"),
        ("user.name", "Dev"),
    ]);
    insta::assert_snapshot!(render(&env), @r"
    GIT_CONFIG_COUNT=3
    GIT_CONFIG_KEY_0=protocol.file.allow
    GIT_CONFIG_KEY_1=submodule.recurse
    GIT_CONFIG_KEY_2=user.name
    GIT_CONFIG_VALUE_0=always
    GIT_CONFIG_VALUE_1=false
    GIT_CONFIG_VALUE_2=Dev
    ");
}

#[test]
fn test_encode_ignores_input_order() {
    let forward = encode_config_env([("a.x", "1"), ("b.y", "2"), ("c.z", "3")]);
    let backward = encode_config_env([("c.z", "3"), ("b.y", "2"), ("a.x", "1")]);
    assert_eq!(forward, backward);
    assert_eq!(render(&forward), render(&backward));
}

#[test]
fn test_encode_duplicate_key_keeps_last_value() {
    let env = encode_config_env([("core.editor", "vi"), ("core.editor", "nano")]);
    assert_eq!(env.get(COUNT_VAR), Some("1"));
    assert_eq!(env.get("GIT_CONFIG_VALUE_0"), Some("nano"));
}

// --- invocation / context ---

#[test]
fn test_invocation_argv_and_config() {
    let ctx = ExecutionContext::new("/work/repo", Env::new());
    let invocation = Invocation::new(&ctx, "fetch")
        .arg("--quiet")
        .args(["origin", "main"])
        .config("fetch.prune", "true");

    assert_eq!(invocation.working_dir(), Path::new("/work/repo"));
    assert_eq!(
        invocation.argv().expect("valid"),
        ["fetch", "--quiet", "origin", "main"]
    );
    assert_eq!(
        invocation.config_overrides().get("fetch.prune").map(String::as_str),
        Some("true")
    );
}

#[test]
fn test_invocation_empty_verb_is_rejected() {
    let err = Invocation::in_dir("/tmp", "").argv().expect_err("empty verb");
    assert!(matches!(err, GitError::InvalidInvocation(_)));
}

#[test]
fn test_context_at_shares_environment() {
    let mut env = Env::new();
    env.set("HOME", "/home/dev");
    let ctx = ExecutionContext::new("/work", env);
    let child = ctx.at("/work/sub");
    assert_eq!(child.working_dir(), Path::new("/work/sub"));
    assert!(child.base_env().shares_storage_with(ctx.base_env()));
}

// --- options ---

#[test]
fn test_default_options_render_quiet_only() {
    assert_eq!(CloneOptions::default().to_args(), ["--quiet"]);
    assert_eq!(FetchOptions::default().to_args(), ["--quiet"]);
    assert_eq!(CheckoutOptions::default().to_args(), ["--quiet"]);
    assert_eq!(PushOptions::default().to_args(), ["--quiet"]);
    assert_eq!(SubmoduleUpdateOptions::default().to_args(), ["--quiet"]);
    assert_eq!(BranchOptions::default().to_args(), ["--no-track"]);
    assert!(CommitOptions::default().to_args().is_empty());
}

#[test]
fn test_clone_options_render_in_order() {
    let options = CloneOptions::builder()
        .branch("v2.0")
        .depth(1)
        .single_branch(true)
        .quiet(false)
        .build();
    insta::assert_snapshot!(options.to_args().join(" "), @"--depth 1 --branch v2.0 --single-branch");
}

#[test]
fn test_fetch_refspecs_need_remote() {
    let with_remote = FetchOptions::builder()
        .remote("upstream")
        .refspecs(vec!["refs/heads/main".to_string()])
        .prune(true)
        .build();
    assert_eq!(
        with_remote.to_args(),
        ["--quiet", "--prune", "upstream", "refs/heads/main"]
    );

    let without_remote = FetchOptions::builder()
        .refspecs(vec!["refs/heads/main".to_string()])
        .build();
    assert_eq!(without_remote.to_args(), ["--quiet"]);
}

#[test]
fn test_commit_without_message_needs_editor() {
    assert!(CommitOptions::default().needs_editor());
    let options = CommitOptions::builder().message("fix: typo").all(true).build();
    assert!(!options.needs_editor());
    assert_eq!(options.to_args(), ["--all", "--message", "fix: typo"]);
}

// --- ops ---

#[tokio::test]
async fn test_branch_exists_empty_output_is_absent() {
    let runner = ScriptedRunner::new(|invocation| {
        if joined(invocation).ends_with(" main") {
            lines(&["main"])
        } else {
            ok()
        }
    });
    let ctx = context();
    assert!(ops::branch_exists(&runner, &ctx, "main").await.expect("query"));
    assert!(!ops::branch_exists(&runner, &ctx, "gone").await.expect("query"));
}

#[tokio::test]
async fn test_branch_exists_non_zero_exit_is_error() {
    let runner = ScriptedRunner::new(|invocation| exit(invocation, 128, "fatal: not a git repository"));
    let err = ops::branch_exists(&runner, &context(), "main")
        .await
        .expect_err("must fail");
    assert_eq!(err.as_execution().and_then(|f| f.exit_code()), Some(128));
}

#[tokio::test]
async fn test_current_branch_shapes() {
    let ctx = context();
    let runner = ScriptedRunner::new(|_| lines(&["main"]));
    assert_eq!(
        ops::current_branch(&runner, &ctx).await.expect("ok").as_deref(),
        Some("main")
    );

    let runner = ScriptedRunner::new(|_| lines(&[]));
    assert_eq!(ops::current_branch(&runner, &ctx).await.expect("ok"), None);

    let runner = ScriptedRunner::new(|_| lines(&["main", "extra"]));
    let err = ops::current_branch(&runner, &ctx).await.expect_err("two lines");
    insta::assert_snapshot!(
        err.to_string(),
        @"unexpected output from `git branch --show-current`: expected at most one line, got 2 line(s)"
    );
}

#[tokio::test]
async fn test_rev_parse_requires_exactly_one_line() {
    let ctx = context();
    let runner = ScriptedRunner::new(|_| lines(&[]));
    let err = ops::rev_parse(&runner, &ctx, "HEAD").await.expect_err("no output");
    assert!(matches!(err, GitError::OutputShape { actual: 0, .. }));

    let runner = ScriptedRunner::new(|_| lines(&["91d92f5732440651499ea7adfa60a362a2bade39"]));
    let oid = ops::rev_parse(&runner, &ctx, "HEAD").await.expect("one line");
    assert_eq!(oid, "91d92f5732440651499ea7adfa60a362a2bade39");
}

#[tokio::test]
async fn test_config_get_exit_one_is_absent() {
    let ctx = context();
    let runner = ScriptedRunner::new(|invocation| exit(invocation, 1, ""));
    assert_eq!(ops::config_get(&runner, &ctx, "user.name").await.expect("absent"), None);

    let runner = ScriptedRunner::new(|invocation| exit(invocation, 3, "error: invalid config file"));
    assert!(ops::config_get(&runner, &ctx, "user.name").await.is_err());
}

#[tokio::test]
async fn test_commit_mode_follows_message() {
    let runner = Arc::new(ScriptedRunner::new(|_| ok()));
    let ctx = context();
    ops::commit(runner.as_ref(), &ctx, &CommitOptions::builder().message("msg").build())
        .await
        .expect("commit");
    ops::commit(runner.as_ref(), &ctx, &CommitOptions::default())
        .await
        .expect("interactive commit");
    assert_eq!(
        runner.calls(),
        vec![vec!["commit", "--message", "msg"], vec!["commit"]]
    );
}

#[tokio::test]
async fn test_clone_and_checkout_argv() {
    let runner = ScriptedRunner::new(|_| ok());
    let ctx = context();
    ops::clone(
        &runner,
        &ctx,
        "https://example.com/repo.git",
        Path::new("repo"),
        &CloneOptions::builder().depth(1).build(),
    )
    .await
    .expect("clone");
    ops::checkout(&runner, &ctx, "v1.0", &CheckoutOptions::builder().detach(true).build())
        .await
        .expect("checkout");
    ops::create_branch(
        &runner,
        &ctx,
        "topic",
        &BranchOptions::builder().start_point("origin/main").track(true).build(),
    )
    .await
    .expect("branch");

    insta::assert_debug_snapshot!(runner.calls(), @r#"
    [
        [
            "clone",
            "--quiet",
            "--depth",
            "1",
            "--",
            "https://example.com/repo.git",
            "repo",
        ],
        [
            "checkout",
            "--quiet",
            "--detach",
            "v1.0",
        ],
        [
            "branch",
            "--track",
            "topic",
            "origin/main",
        ],
    ]
    "#);
}
