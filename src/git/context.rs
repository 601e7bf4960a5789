// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Caller-supplied execution context.
//!
//! ```text
//! ExecutionContext { working_dir, base_env, span }
//!        |
//!        +--> Invocation::new(&ctx, verb)   working_dir
//!        +--> CommandRunner::execute(&ctx)  base_env, span
//! ```

use std::path::{Path, PathBuf};

use tracing::Span;

use crate::core::env::{container::Env, current_env};

/// Where and with what environment git runs, and which span records it.
///
/// Cloning is cheap: the environment is shared until modified.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    working_dir: PathBuf,
    base_env: Env,
    span: Span,
}

impl ExecutionContext {
    /// Creates a context with an explicit base environment and the current span.
    pub fn new(working_dir: impl Into<PathBuf>, base_env: Env) -> Self {
        Self {
            working_dir: working_dir.into(),
            base_env,
            span: Span::current(),
        }
    }

    /// Creates a context that inherits this process's environment.
    pub fn inherit(working_dir: impl Into<PathBuf>) -> Self {
        Self::new(working_dir, current_env())
    }

    /// Replaces the span that git invocations are recorded under.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns a context for another directory sharing env and span.
    #[must_use]
    pub fn at(&self, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            base_env: self.base_env.clone(),
            span: self.span.clone(),
        }
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub const fn base_env(&self) -> &Env {
        &self.base_env
    }

    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }
}
