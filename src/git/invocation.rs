// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A single git command request.
//!
//! ```text
//! Invocation::new(&ctx, "submodule")
//!     .arg("update").args(opts.to_args()).arg("--").arg(path)
//!     .config("core.longpaths", "true")
//!
//! argv()  -> ["submodule", "update", ..., "--", path]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::context::ExecutionContext;
use crate::error::{GitError, GitResult};

/// Verb, arguments, working directory and per-call configuration overrides.
///
/// Built fresh for every call and only read once handed to a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    verb: String,
    args: Vec<String>,
    working_dir: PathBuf,
    config: BTreeMap<String, String>,
}

impl Invocation {
    /// Starts an invocation in the context's working directory.
    pub fn new(ctx: &ExecutionContext, verb: impl Into<String>) -> Self {
        Self::in_dir(ctx.working_dir(), verb)
    }

    /// Starts an invocation in an explicit directory.
    pub fn in_dir(working_dir: impl Into<PathBuf>, verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            config: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds a per-call configuration override.
    ///
    /// These win over every value the runner injects.
    #[must_use]
    pub fn config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub const fn config_overrides(&self) -> &BTreeMap<String, String> {
        &self.config
    }

    /// Returns the full argument vector passed to git.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidInvocation` if the verb is empty.
    pub fn argv(&self) -> GitResult<Vec<String>> {
        if self.verb.trim().is_empty() {
            return Err(GitError::InvalidInvocation(format!(
                "empty verb (arguments: {:?})",
                self.args
            )));
        }
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.verb.clone());
        argv.extend(self.args.iter().cloned());
        Ok(argv)
    }
}
