// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                   GitError
//!                      |
//!   +---------+--------+-------+-----------+-----------+
//!   |         |        |       |           |           |
//!   v         v        v       v           v           v
//! Execution OutputShape Parse Aggregate TrackingCycle Invalid  Incomplete
//!   Box                        Box                    Invocation (task lost)
//!    |                          |
//!    v                          v
//! ExecutionFailure        AggregateFailure
//!  cwd, args, stdout,      path -> GitError
//!  stderr, cause           succeeded paths
//!    |
//!    v
//! FailureCause: Exit(code) | Process(ProcessError)
//!
//! ConfigError   settings validation / parsing
//! ProcessError  spawn, wait, lookup failures
//! ```
//!
//! Library code returns [`GitResult`]; command handlers and `main` use
//! `anyhow` through [`Result`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GitError`].
pub type GitResult<T> = std::result::Result<T, GitError>;

// --- Git Errors ---

/// Failures surfaced by the git control layer.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git process ran (or failed to start) and the outcome was unacceptable.
    #[error(transparent)]
    Execution(Box<ExecutionFailure>),

    /// Captured output did not have the shape an operation requires.
    #[error("unexpected output from `git {command}`: expected {expected}, got {actual} line(s)")]
    OutputShape {
        command: String,
        expected: &'static str,
        actual: usize,
    },

    /// A structured text format did not match its grammar.
    #[error("failed to parse {line:?}: {reason}")]
    Parse { line: String, reason: &'static str },

    /// One or more independent sub-operations of a fan-out failed.
    #[error(transparent)]
    Aggregate(Box<AggregateFailure>),

    /// Local branch tracking links form a cycle.
    #[error("branch tracking cycle detected: {}", chain.join(" -> "))]
    TrackingCycle { chain: Vec<String> },

    /// An invocation could not be constructed (programmer error).
    #[error("invalid git invocation: {0}")]
    InvalidInvocation(String),

    /// A fan-out task ended without reporting a result.
    #[error("git task did not complete: {0}")]
    Incomplete(String),
}

impl GitError {
    /// Returns the execution failure if this error wraps one.
    #[must_use]
    pub fn as_execution(&self) -> Option<&ExecutionFailure> {
        match self {
            Self::Execution(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ExecutionFailure> for GitError {
    fn from(failure: ExecutionFailure) -> Self {
        Self::Execution(Box::new(failure))
    }
}

impl From<AggregateFailure> for GitError {
    fn from(failure: AggregateFailure) -> Self {
        Self::Aggregate(Box::new(failure))
    }
}

/// Why an execution was rejected.
#[derive(Debug, Error)]
pub enum FailureCause {
    /// The process exited with an unacceptable status.
    #[error("exited with code {0}")]
    Exit(i32),

    /// The process could not be spawned or awaited.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Context for a failed git invocation.
///
/// Keeps stdout and stderr so a diagnostic can be rebuilt even when the
/// caller decided on content-based failure.
#[derive(Debug)]
pub struct ExecutionFailure {
    working_dir: PathBuf,
    args: Vec<String>,
    stdout: String,
    stderr: String,
    cause: FailureCause,
}

impl ExecutionFailure {
    #[must_use]
    pub const fn new(
        working_dir: PathBuf,
        args: Vec<String>,
        stdout: String,
        stderr: String,
        cause: FailureCause,
    ) -> Self {
        Self {
            working_dir,
            args,
            stdout,
            stderr,
            cause,
        }
    }

    /// Returns the working directory the process ran in.
    #[must_use]
    pub const fn working_dir(&self) -> &PathBuf {
        &self.working_dir
    }

    /// Returns the full argument vector (without the executable).
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns captured stdout (empty for interactive runs).
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Returns captured stderr.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn cause(&self) -> &FailureCause {
        &self.cause
    }

    /// Returns the exit code, or `None` if the process never completed.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self.cause {
            FailureCause::Exit(code) => Some(code),
            FailureCause::Process(_) => None,
        }
    }
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`git {}` in {} {}",
            self.args.join(" "),
            self.working_dir.display(),
            self.cause
        )?;
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, ": {stderr}")?;
        } else if !self.stdout.trim().is_empty() {
            write!(f, ": {}", self.stdout.trim())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExecutionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Failures of independent sub-operations, keyed by their identity.
///
/// Each entry keeps its own error; nothing is flattened into a single message.
#[derive(Debug)]
pub struct AggregateFailure {
    failures: BTreeMap<String, GitError>,
    succeeded: BTreeSet<String>,
}

impl AggregateFailure {
    #[must_use]
    pub const fn new(failures: BTreeMap<String, GitError>, succeeded: BTreeSet<String>) -> Self {
        Self {
            failures,
            succeeded,
        }
    }

    /// Returns the failed identities with their errors.
    #[must_use]
    pub const fn failures(&self) -> &BTreeMap<String, GitError> {
        &self.failures
    }

    /// Returns the identities that completed successfully.
    #[must_use]
    pub const fn succeeded(&self) -> &BTreeSet<String> {
        &self.succeeded
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} submodule(s) failed to sync",
            self.failures.len(),
            self.failures.len() + self.succeeded.len()
        )?;
        for (path, error) in &self.failures {
            write!(f, "\n  {path}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateFailure {}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while streaming to or waiting on the process.
    #[error("i/o error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a status outside the accepted set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}
