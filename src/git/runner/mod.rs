// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Execution of git invocations.
//!
//! ```text
//! Invocation + ExecutionContext
//!        |
//!        v
//! environment()
//!   base_env
//!   < identity      user.name/email, GIT_AUTHOR_*, GIT_COMMITTER_*
//!   < defaults      submodule.recurse=false, protocol.file.allow=always
//!                   fetch.uriprotocols=https (offload)
//!   < runner config [git.config]
//!   < per-call      Invocation::config
//!        |  encode_config_env
//!        v
//! ProcessBuilder(git argv) --> ProcessOutput
//!        |
//!        v
//! exit 0  --> ExecutionResult { stdout lines, stderr, exit_code }
//! exit !0 --> GitError::Execution(ExecutionFailure)
//! ```
//!
//! | Mode        | stdout                 | stdin   | stderr           |
//! |-------------|------------------------|---------|------------------|
//! | Silent      | captured, not returned | null    | captured         |
//! | Captured    | split into lines       | null    | captured         |
//! | Interactive | terminal               | terminal| terminal + kept  |

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bon::Builder;
use futures_util::future::BoxFuture;
use tracing::{Instrument, debug};

use super::config_env::encode_config_env;
use super::context::ExecutionContext;
use super::invocation::Invocation;
use crate::config::types::GitConfig;
use crate::core::env::container::Env;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::{ExecutionFailure, FailureCause, GitResult, ProcessError};

/// How a git process's streams are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Only the exit status matters; output is kept for diagnostics.
    Silent,
    /// Stdout is captured and split into lines.
    Captured,
    /// Stdout and stdin belong to the user's terminal.
    Interactive,
}

/// Output of a successful git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    stdout: Vec<String>,
    stderr: String,
    exit_code: i32,
}

impl ExecutionResult {
    #[must_use]
    pub const fn new(stdout: Vec<String>, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Returns stdout lines (empty unless run in captured mode).
    #[must_use]
    pub fn stdout(&self) -> &[String] {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.stdout
    }
}

/// Splits captured stdout into lines with trailing blank lines removed.
///
/// Output that is only whitespace yields no lines at all.
#[must_use]
pub fn split_lines(output: &str) -> Vec<String> {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().map(str::to_string).collect()
}

/// Runs git invocations.
///
/// Implementations must be safe to call concurrently: every call owns its
/// own buffers and child process.
pub trait CommandRunner: Send + Sync {
    /// Runs one invocation in the given mode.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidInvocation` for an empty verb and
    /// `GitError::Execution` when the process fails to run or exits non-zero.
    fn execute<'a>(
        &'a self,
        ctx: &'a ExecutionContext,
        invocation: &'a Invocation,
        mode: ExecutionMode,
    ) -> BoxFuture<'a, GitResult<ExecutionResult>>;

    /// Runs an invocation in captured mode and returns its stdout lines.
    fn execute_lines<'a>(
        &'a self,
        ctx: &'a ExecutionContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, GitResult<Vec<String>>> {
        Box::pin(async move {
            self.execute(ctx, invocation, ExecutionMode::Captured)
                .await
                .map(ExecutionResult::into_lines)
        })
    }

    /// Runs an invocation attached to the user's terminal.
    ///
    /// Never used from concurrent fan-out.
    fn execute_interactive<'a>(
        &'a self,
        ctx: &'a ExecutionContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, GitResult<()>> {
        Box::pin(async move {
            self.execute(ctx, invocation, ExecutionMode::Interactive)
                .await
                .map(|_| ())
        })
    }
}

/// Author and committer identity injected into every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// [`CommandRunner`] that spawns the real git executable.
#[derive(Debug, Clone, Builder)]
pub struct GitRunner {
    #[builder(into, default = PathBuf::from("git"))]
    executable: PathBuf,
    identity: Option<Identity>,
    /// Restricts fetch transports to https.
    #[builder(default)]
    offload: bool,
    /// Extra overrides applied to every invocation.
    #[builder(default)]
    config: BTreeMap<String, String>,
}

impl GitRunner {
    /// Builds a runner from the `[git]` settings.
    ///
    /// Without an explicit `executable`, git is looked up in `PATH` once.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if git cannot be located.
    pub fn from_config(git: &GitConfig) -> Result<Self, ProcessError> {
        let executable = match git.executable() {
            Some(path) => path.to_path_buf(),
            None => ProcessBuilder::find("git").ok_or_else(|| ProcessError::ExecutableNotFound {
                name: "git".to_string(),
            })?,
        };
        Ok(Self::builder()
            .executable(executable)
            .maybe_identity(git.identity())
            .offload(git.offload())
            .config(git.config().clone())
            .build())
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub const fn offload(&self) -> bool {
        self.offload
    }

    /// Returns the configuration overrides for one invocation, lowest
    /// precedence first, later entries replacing earlier ones.
    #[must_use]
    pub fn effective_config(&self, invocation: &Invocation) -> BTreeMap<String, String> {
        let mut config = BTreeMap::new();
        if let Some(identity) = &self.identity {
            config.insert("user.name".to_string(), identity.name.clone());
            config.insert("user.email".to_string(), identity.email.clone());
        }
        config.insert("submodule.recurse".to_string(), "false".to_string());
        config.insert("protocol.file.allow".to_string(), "always".to_string());
        if self.offload {
            config.insert("fetch.uriprotocols".to_string(), "https".to_string());
        }
        config.extend(self.config.iter().map(|(k, v)| (k.clone(), v.clone())));
        config.extend(
            invocation
                .config_overrides()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        config
    }

    /// Builds the full child environment for one invocation.
    #[must_use]
    pub fn environment(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
        mode: ExecutionMode,
    ) -> Env {
        let mut env = ctx.base_env().clone();
        if let Some(identity) = &self.identity {
            env.set("GIT_AUTHOR_NAME", identity.name.as_str());
            env.set("GIT_AUTHOR_EMAIL", identity.email.as_str());
            env.set("GIT_COMMITTER_NAME", identity.name.as_str());
            env.set("GIT_COMMITTER_EMAIL", identity.email.as_str());
        }
        if mode != ExecutionMode::Interactive {
            // nobody is there to answer a credential prompt
            env.set("GIT_TERMINAL_PROMPT", "0");
            env.set("GCM_INTERACTIVE", "never");
        }
        env.overlay(&encode_config_env(self.effective_config(invocation)));
        env
    }

    async fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
        mode: ExecutionMode,
    ) -> GitResult<ExecutionResult> {
        let argv = invocation.argv()?;
        let working_dir = invocation.working_dir().to_path_buf();

        let builder = ProcessBuilder::new(&self.executable)
            .name("git")
            .args(&argv)
            .cwd(&working_dir)
            .env(self.environment(ctx, invocation, mode))
            .flag(ProcessFlags::ALLOW_FAILURE);
        let captured = StreamFlags::KEEP_IN_STRING | StreamFlags::FORWARD_TO_LOG;
        let builder = match mode {
            ExecutionMode::Silent | ExecutionMode::Captured => builder
                .stdout_flags(captured)
                .stderr_flags(captured),
            ExecutionMode::Interactive => builder
                .inherit_stdout()
                .inherit_stdin()
                .stderr_flags(StreamFlags::TEE | StreamFlags::KEEP_IN_STRING),
        };

        let output = match builder.run().await {
            Ok(output) => output,
            Err(e) => {
                return Err(ExecutionFailure::new(
                    working_dir,
                    argv,
                    String::new(),
                    String::new(),
                    FailureCause::Process(e),
                )
                .into());
            }
        };

        let exit_code = output.exit_code();
        let (stdout, stderr) = output.into_streams();
        if exit_code != 0 {
            debug!(verb = invocation.verb(), exit_code, "git failed");
            return Err(ExecutionFailure::new(
                working_dir,
                argv,
                stdout,
                stderr,
                FailureCause::Exit(exit_code),
            )
            .into());
        }

        let lines = match mode {
            ExecutionMode::Captured => split_lines(&stdout),
            ExecutionMode::Silent | ExecutionMode::Interactive => Vec::new(),
        };
        Ok(ExecutionResult::new(lines, stderr, exit_code))
    }
}

impl CommandRunner for GitRunner {
    fn execute<'a>(
        &'a self,
        ctx: &'a ExecutionContext,
        invocation: &'a Invocation,
        mode: ExecutionMode,
    ) -> BoxFuture<'a, GitResult<ExecutionResult>> {
        Box::pin(self.run(ctx, invocation, mode).instrument(ctx.span().clone()))
    }
}

#[cfg(test)]
mod tests;
