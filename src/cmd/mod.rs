// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), sync, git (status, tracking, exec, config-env)
//!        |
//!        v
//!   GitSession: Arc<GitRunner> + ExecutionContext(workdir, process env, span)
//! ```

pub mod config;
pub mod git;
pub mod sync;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info_span;

use crate::config::Config;
use crate::error::Result;
use crate::git::context::ExecutionContext;
use crate::git::runner::GitRunner;

/// Runner and context shared by the git-facing commands.
pub struct GitSession {
    runner: Arc<GitRunner>,
    ctx: ExecutionContext,
}

impl GitSession {
    /// Builds a runner from `[git]` and a context rooted at `workdir`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be located.
    pub fn open(config: &Config, workdir: &Path, command: &str) -> Result<Self> {
        let runner = GitRunner::from_config(&config.git).context("failed to set up git")?;
        let span = info_span!("gitdrive", command, workdir = %workdir.display());
        let ctx = ExecutionContext::inherit(workdir).with_span(span);
        Ok(Self {
            runner: Arc::new(runner),
            ctx,
        })
    }

    #[must_use]
    pub fn runner(&self) -> Arc<GitRunner> {
        Arc::clone(&self.runner)
    }

    #[must_use]
    pub const fn ctx(&self) -> &ExecutionContext {
        &self.ctx
    }
}
