// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-invocation repository operations.
//!
//! ```text
//! clone / fetch / checkout / create_branch / push / config_set   Silent
//! commit                                  Silent, or Interactive without -m
//! branch_exists / current_branch / rev_parse / config_get
//! submodule_status                        Captured, output shape checked
//! ```
//!
//! Success is decided by the exit code alone, except where noted on the
//! operation.

use std::path::Path;

use tracing::debug;

use super::context::ExecutionContext;
use super::invocation::Invocation;
use super::options::{
    BranchOptions, CheckoutOptions, CloneOptions, CommitOptions, FetchOptions, PushOptions,
};
use super::runner::{CommandRunner, ExecutionMode};
use super::submodule::{SubmoduleEntry, parse_status};
use crate::error::{GitError, GitResult};

async fn run_silent<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    invocation: Invocation,
) -> GitResult<()> {
    runner
        .execute(ctx, &invocation, ExecutionMode::Silent)
        .await
        .map(|_| ())
}

fn command_text(invocation: &Invocation) -> String {
    std::iter::once(invocation.verb())
        .chain(invocation.arguments().iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a captured invocation that must print exactly one line.
async fn single_line<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    invocation: Invocation,
) -> GitResult<String> {
    let mut lines = runner.execute_lines(ctx, &invocation).await?;
    if lines.len() != 1 {
        return Err(GitError::OutputShape {
            command: command_text(&invocation),
            expected: "exactly one line",
            actual: lines.len(),
        });
    }
    Ok(lines.remove(0))
}

/// Clones `url` into `dest`. Runs from the context's directory.
///
/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn clone<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    url: &str,
    dest: &Path,
    options: &CloneOptions,
) -> GitResult<()> {
    let invocation = Invocation::new(ctx, "clone")
        .args(options.to_args())
        .arg("--")
        .arg(url)
        .arg(dest.to_string_lossy());
    run_silent(runner, ctx, invocation).await
}

/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn fetch<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    options: &FetchOptions,
) -> GitResult<()> {
    let invocation = Invocation::new(ctx, "fetch").args(options.to_args());
    run_silent(runner, ctx, invocation).await
}

/// Checks out a branch, tag or commit.
///
/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn checkout<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    target: &str,
    options: &CheckoutOptions,
) -> GitResult<()> {
    let invocation = Invocation::new(ctx, "checkout")
        .config("advice.detachedHead", "false")
        .args(options.to_args())
        .arg(target);
    run_silent(runner, ctx, invocation).await
}

/// Creates a local branch without switching to it.
///
/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn create_branch<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    name: &str,
    options: &BranchOptions,
) -> GitResult<()> {
    let mut invocation = Invocation::new(ctx, "branch").args(options.to_args()).arg(name);
    if let Some(start) = &options.start_point {
        invocation = invocation.arg(start.as_str());
    }
    run_silent(runner, ctx, invocation).await
}

/// Returns true if a local branch named `name` exists.
///
/// Exit 0 with no output means the branch is absent; any non-zero exit is
/// an error even though git may still have printed something.
///
/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn branch_exists<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    name: &str,
) -> GitResult<bool> {
    let invocation = Invocation::new(ctx, "branch")
        .args(["--list", "--format=%(refname:short)"])
        .arg(name);
    let lines = runner.execute_lines(ctx, &invocation).await?;
    Ok(lines.iter().any(|line| line.trim() == name))
}

/// Returns the checked-out branch, or `None` when HEAD is detached.
///
/// # Errors
///
/// Returns `GitError::OutputShape` if git prints more than one line.
pub async fn current_branch<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
) -> GitResult<Option<String>> {
    let invocation = Invocation::new(ctx, "branch").arg("--show-current");
    let mut lines = runner.execute_lines(ctx, &invocation).await?;
    match lines.len() {
        0 => Ok(None),
        1 => Ok(Some(lines.remove(0))),
        actual => Err(GitError::OutputShape {
            command: command_text(&invocation),
            expected: "at most one line",
            actual,
        }),
    }
}

/// Resolves a revision to its object id.
///
/// # Errors
///
/// Returns `GitError::Execution` for unknown revisions and
/// `GitError::OutputShape` unless git prints exactly one line.
pub async fn rev_parse<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    revision: &str,
) -> GitResult<String> {
    let invocation = Invocation::new(ctx, "rev-parse")
        .arg("--verify")
        .arg("--end-of-options")
        .arg(revision);
    single_line(runner, ctx, invocation).await
}

/// Reads a configuration value; `None` when the key is not set.
///
/// Exit code 1 is git's "key not found" and is not an error.
///
/// # Errors
///
/// Returns `GitError::Execution` for any other non-zero exit.
pub async fn config_get<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    key: &str,
) -> GitResult<Option<String>> {
    let invocation = Invocation::new(ctx, "config").arg("--get").arg(key);
    match runner.execute_lines(ctx, &invocation).await {
        Ok(lines) => Ok(Some(lines.join("\n"))),
        Err(e) if e.as_execution().and_then(|f| f.exit_code()) == Some(1) => {
            debug!(key, "config key not set");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Writes a repository-local configuration value.
///
/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn config_set<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    key: &str,
    value: &str,
) -> GitResult<()> {
    let invocation = Invocation::new(ctx, "config").arg(key).arg(value);
    run_silent(runner, ctx, invocation).await
}

/// Records a commit; without a message the user's editor is opened.
///
/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn commit<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    options: &CommitOptions,
) -> GitResult<()> {
    let invocation = Invocation::new(ctx, "commit").args(options.to_args());
    if options.needs_editor() {
        runner.execute_interactive(ctx, &invocation).await
    } else {
        run_silent(runner, ctx, invocation).await
    }
}

/// # Errors
///
/// Returns `GitError::Execution` if git exits non-zero.
pub async fn push<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
    options: &PushOptions,
) -> GitResult<()> {
    let invocation = Invocation::new(ctx, "push").args(options.to_args());
    run_silent(runner, ctx, invocation).await
}

/// Lists the superproject's submodules.
///
/// # Errors
///
/// Returns `GitError::Parse` if any status line is malformed.
pub async fn submodule_status<R: CommandRunner + ?Sized>(
    runner: &R,
    ctx: &ExecutionContext,
) -> GitResult<Vec<SubmoduleEntry>> {
    let invocation = Invocation::new(ctx, "submodule").arg("status");
    let lines = runner.execute_lines(ctx, &invocation).await?;
    parse_status(&lines)
}
