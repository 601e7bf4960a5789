// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command implementations for gitdrive.

use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use tracing::info;

use super::GitSession;
use crate::cli::git::{ConfigEnvArgs, ExecArgs, StatusArgs, TrackingArgs};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::git::config_env::{COUNT_VAR, encode_config_env, key_var, value_var};
use crate::git::invocation::Invocation;
use crate::git::ops;
use crate::git::runner::CommandRunner;
use crate::git::submodule::{SubmoduleEntry, SubmoduleSyncEngine};
use crate::git::tracking::{LOCAL_REMOTE, TrackingLink, TrackingResolver};

/// Handler for the status command.
///
/// # Errors
///
/// Returns an error if git fails or prints a line that is not a status entry.
pub async fn run_status_command(args: &StatusArgs, config: &Config, workdir: &Path) -> Result<()> {
    let session = GitSession::open(config, workdir, "status")?;
    let engine = SubmoduleSyncEngine::new(session.runner(), session.ctx().clone());
    let entries = engine
        .status()
        .await
        .with_context(|| format!("failed to list submodules in {}", workdir.display()))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("failed to serialize status")?
        );
    } else {
        for line in format_status(&entries) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One line per submodule: marker, abbreviated object id, path, annotation.
#[must_use]
pub fn format_status(entries: &[SubmoduleEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let oid = entry.object_id().get(..12).unwrap_or(entry.object_id());
            let mut line = format!("{}{oid} {}", entry.state().marker(), entry.path());
            if let Some(hint) = entry.branch_hint() {
                let _ = write!(line, " ({hint})");
            }
            line
        })
        .collect()
}

/// Handler for the tracking command.
///
/// Prints the resolved branch name, or nothing when there is no upstream.
///
/// # Errors
///
/// Returns an error on a tracking cycle or if git cannot be queried.
pub async fn run_tracking_command(
    args: &TrackingArgs,
    config: &Config,
    workdir: &Path,
) -> Result<()> {
    let session = GitSession::open(config, workdir, "tracking")?;
    let runner = session.runner();
    let resolver = TrackingResolver::new(Arc::clone(&runner), session.ctx().clone());

    if args.chain {
        let start = match &args.branch {
            Some(branch) => branch.clone(),
            None => ops::current_branch(runner.as_ref(), session.ctx())
                .await?
                .ok_or_else(|| anyhow!("HEAD is detached"))?,
        };
        let links = resolver.chain(&start).await?;
        for line in format_chain(&links) {
            println!("{line}");
        }
        return Ok(());
    }

    let resolved = match &args.branch {
        Some(branch) => resolver.resolve_from(branch).await?,
        None => resolver.resolve_remote_tracking_branch().await?,
    };
    if resolved.is_empty() {
        info!("no remote-tracking branch configured");
    } else {
        println!("{resolved}");
    }
    Ok(())
}

/// One line per tracking link, `branch -> upstream`.
#[must_use]
pub fn format_chain(links: &[TrackingLink]) -> Vec<String> {
    links
        .iter()
        .map(|link| match (link.remote(), link.upstream_branch()) {
            (Some(LOCAL_REMOTE), Some(upstream)) => format!("{} -> {upstream} (local)", link.branch()),
            (Some(remote), Some(upstream)) => format!("{} -> {remote}/{upstream}", link.branch()),
            _ => format!("{} (no upstream)", link.branch()),
        })
        .collect()
}

/// Handler for the exec command.
///
/// # Errors
///
/// Returns an error if git cannot run or exits non-zero.
pub async fn run_exec_command(args: &ExecArgs, config: &Config, workdir: &Path) -> Result<()> {
    let Some((verb, rest)) = args.args.split_first() else {
        return Err(anyhow!("no git command given"));
    };
    let session = GitSession::open(config, workdir, "exec")?;
    let runner = session.runner();
    let invocation = Invocation::new(session.ctx(), verb.as_str()).args(rest.iter().cloned());

    if args.interactive {
        runner
            .execute_interactive(session.ctx(), &invocation)
            .await?;
    } else {
        for line in runner.execute_lines(session.ctx(), &invocation).await? {
            println!("{line}");
        }
    }
    Ok(())
}

/// Handler for the config-env command.
///
/// # Errors
///
/// Returns an error if an entry is not `KEY=VALUE`.
pub fn run_config_env_command(args: &ConfigEnvArgs) -> Result<()> {
    for line in render_config_env(&args.entries)? {
        println!("{line}");
    }
    Ok(())
}

/// Renders `KEY=VALUE` overrides as `NAME=value` lines in protocol order.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` for an entry without `=` or with an
/// empty key.
pub fn render_config_env(entries: &[String]) -> Result<Vec<String>> {
    let pairs = entries
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
            _ => Err(ConfigError::ParseError {
                path: "config-env".to_string(),
                message: format!("expected KEY=VALUE, got '{entry}'"),
            }),
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let env = encode_config_env(pairs);
    let count = env
        .get(COUNT_VAR)
        .and_then(|count| count.parse::<usize>().ok())
        .unwrap_or(0);

    let mut lines = vec![format!("{COUNT_VAR}={count}")];
    for index in 0..count {
        for name in [key_var(index), value_var(index)] {
            lines.push(format!("{name}={}", env.get(&name).unwrap_or_default()));
        }
    }
    Ok(lines)
}
