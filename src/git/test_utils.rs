// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted [`CommandRunner`] for unit tests.
//!
//! Records every argument vector, answers from a closure, and tracks how
//! many invocations were in flight at once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use futures_util::future::BoxFuture;

use super::context::ExecutionContext;
use super::invocation::Invocation;
use super::runner::{CommandRunner, ExecutionMode, ExecutionResult};
use crate::core::env::container::Env;
use crate::error::{ExecutionFailure, FailureCause, GitResult};

type Handler = dyn Fn(&Invocation) -> GitResult<ExecutionResult> + Send + Sync;

pub(super) struct ScriptedRunner {
    handler: Box<Handler>,
    calls: Mutex<Vec<Vec<String>>>,
    delay: Option<Duration>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedRunner {
    pub(super) fn new(
        handler: impl Fn(&Invocation) -> GitResult<ExecutionResult> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            delay: None,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Makes every invocation take `delay` before answering.
    pub(super) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(super) fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Counts recorded calls whose argv starts with `prefix`.
    pub(super) fn count(&self, prefix: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|argv| argv.len() >= prefix.len() && argv.iter().zip(prefix).all(|(a, p)| a == p))
            .count()
    }

    pub(super) fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandRunner for ScriptedRunner {
    fn execute<'a>(
        &'a self,
        _ctx: &'a ExecutionContext,
        invocation: &'a Invocation,
        mode: ExecutionMode,
    ) -> BoxFuture<'a, GitResult<ExecutionResult>> {
        Box::pin(async move {
            let argv = invocation.argv()?;
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(argv);

            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.active.fetch_sub(1, Ordering::SeqCst);

            let result = (self.handler)(invocation)?;
            if mode == ExecutionMode::Captured {
                Ok(result)
            } else {
                Ok(ExecutionResult::new(Vec::new(), result.stderr().to_string(), 0))
            }
        })
    }
}

pub(super) fn context() -> ExecutionContext {
    ExecutionContext::new("/work/super", Env::new())
}

/// Successful result printing `lines`.
pub(super) fn lines(lines: &[&str]) -> GitResult<ExecutionResult> {
    Ok(ExecutionResult::new(
        lines.iter().map(ToString::to_string).collect(),
        String::new(),
        0,
    ))
}

pub(super) fn ok() -> GitResult<ExecutionResult> {
    lines(&[])
}

/// Failure as the real runner reports a non-zero exit.
pub(super) fn exit(invocation: &Invocation, code: i32, stderr: &str) -> GitResult<ExecutionResult> {
    Err(ExecutionFailure::new(
        invocation.working_dir().to_path_buf(),
        invocation.argv()?,
        String::new(),
        stderr.to_string(),
        FailureCause::Exit(code),
    )
    .into())
}

/// Returns the argv of `invocation` joined by spaces.
pub(super) fn joined(invocation: &Invocation) -> String {
    invocation.argv().map(|argv| argv.join(" ")).unwrap_or_default()
}
