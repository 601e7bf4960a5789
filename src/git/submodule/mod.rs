// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded-concurrency submodule synchronization.
//!
//! ```text
//! synchronize_all()
//!   |
//!   v
//! git submodule status            (one call, strict parse)
//!   |  select state == Uninitialized
//!   v
//! none? ----------------------------------> Ok(empty outcome)
//!   |
//!   v
//! git submodule init -- p1 p2 ...  (one batch, failure aborts)
//!   |
//!   v
//! JoinSet + Semaphore(jobs)
//!   +--> git submodule update [opts] -- p1 --+
//!   +--> git submodule update [opts] -- p2 --+--> Mutex<SyncOutcome>
//!   +--> ...                               --+
//!   |
//!   v
//! failures empty? Ok(outcome) : Err(GitError::Aggregate)
//! ```
//!
//! Every selected path gets exactly one fetch attempt; one path failing
//! never cancels its siblings.

mod status;

pub use status::{SubmoduleEntry, SubmoduleState, parse_status, parse_status_line};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, info_span, warn};

use super::context::ExecutionContext;
use super::invocation::Invocation;
use super::ops;
use super::options::SubmoduleUpdateOptions;
use super::runner::{CommandRunner, ExecutionMode};
use crate::error::{AggregateFailure, GitError, GitResult};

/// Default fetch concurrency, matching git's own job cap used elsewhere.
pub const DEFAULT_JOBS: usize = 50;

/// Highest job count accepted from configuration.
pub const MAX_JOBS: usize = 1024;

/// Result of one synchronization pass.
///
/// `attempted` is always the disjoint union of `succeeded` and the keys of
/// `failures`.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    attempted: BTreeSet<String>,
    succeeded: BTreeSet<String>,
    failures: BTreeMap<String, GitError>,
}

impl SyncOutcome {
    pub(crate) fn record(&mut self, path: String, result: GitResult<()>) {
        self.attempted.insert(path.clone());
        match result {
            Ok(()) => {
                self.failures.remove(&path);
                self.succeeded.insert(path);
            }
            Err(e) => {
                self.succeeded.remove(&path);
                self.failures.insert(path, e);
            }
        }
    }

    #[must_use]
    pub const fn attempted(&self) -> &BTreeSet<String> {
        &self.attempted
    }

    #[must_use]
    pub const fn succeeded(&self) -> &BTreeSet<String> {
        &self.succeeded
    }

    #[must_use]
    pub const fn failures(&self) -> &BTreeMap<String, GitError> {
        &self.failures
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turns an outcome with failures into `GitError::Aggregate`.
    ///
    /// # Errors
    ///
    /// Returns the aggregate of every failed path when any path failed.
    pub fn into_result(self) -> GitResult<Self> {
        if self.failures.is_empty() {
            return Ok(self);
        }
        Err(AggregateFailure::new(self.failures, self.succeeded).into())
    }
}

/// Discovers, initializes and fetches uninitialized submodules.
pub struct SubmoduleSyncEngine<R> {
    runner: Arc<R>,
    ctx: ExecutionContext,
    jobs: usize,
    update: SubmoduleUpdateOptions,
}

impl<R: CommandRunner + 'static> SubmoduleSyncEngine<R> {
    /// Creates an engine for the superproject at `ctx.working_dir()`.
    pub fn new(runner: Arc<R>, ctx: ExecutionContext) -> Self {
        Self {
            runner,
            ctx,
            jobs: DEFAULT_JOBS,
            update: SubmoduleUpdateOptions::default(),
        }
    }

    /// Sets the number of concurrent fetches, clamped to what a semaphore
    /// can hold.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Sets the options passed to every per-path `git submodule update`.
    #[must_use]
    pub fn with_update_options(mut self, update: SubmoduleUpdateOptions) -> Self {
        self.update = update;
        self
    }

    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Lists every submodule of the superproject.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Execution` if the status query fails and
    /// `GitError::Parse` if any line is malformed.
    pub async fn status(&self) -> GitResult<Vec<SubmoduleEntry>> {
        ops::submodule_status(self.runner.as_ref(), &self.ctx).await
    }

    /// Returns the paths of submodules that are not initialized yet.
    ///
    /// # Errors
    ///
    /// Same as [`Self::status`].
    pub async fn uninitialized_paths(&self) -> GitResult<Vec<String>> {
        Ok(self
            .status()
            .await?
            .into_iter()
            .filter(SubmoduleEntry::is_uninitialized)
            .map(|entry| entry.path().to_string())
            .collect())
    }

    /// Synchronizes every uninitialized submodule and succeeds only if all did.
    ///
    /// # Errors
    ///
    /// Returns the status or init error as is, and `GitError::Aggregate`
    /// naming every path whose fetch failed.
    pub async fn synchronize_all(&self) -> GitResult<SyncOutcome> {
        self.synchronize().await?.into_result()
    }

    /// Synchronizes every uninitialized submodule and reports per-path results.
    ///
    /// Fetch failures are recorded in the outcome instead of failing the call.
    ///
    /// # Errors
    ///
    /// Returns an error only if the status query or the batch init fails.
    pub async fn synchronize(&self) -> GitResult<SyncOutcome> {
        let paths = self.uninitialized_paths().await?;
        if paths.is_empty() {
            debug!("no uninitialized submodules");
            return Ok(SyncOutcome::default());
        }

        info!(count = paths.len(), "initializing submodules");
        let init = Invocation::new(&self.ctx, "submodule")
            .args(["init", "--"])
            .args(paths.iter().cloned());
        self.runner
            .execute(&self.ctx, &init, ExecutionMode::Silent)
            .await?;

        let outcome = self.fetch_all(paths).await;
        info!(
            succeeded = outcome.succeeded().len(),
            failed = outcome.failures().len(),
            "submodule sync finished"
        );
        Ok(outcome)
    }

    async fn fetch_all(&self, paths: Vec<String>) -> SyncOutcome {
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let accumulator = Arc::new(Mutex::new(SyncOutcome::default()));
        let update_args = self.update.to_args();
        let mut tasks = JoinSet::new();

        for path in &paths {
            let span = info_span!(parent: self.ctx.span(), "submodule", path = %path);
            let ctx = self.ctx.clone().with_span(span);
            let invocation = Invocation::new(&ctx, "submodule")
                .arg("update")
                .args(update_args.iter().cloned())
                .arg("--")
                .arg(path.as_str());
            let runner = Arc::clone(&self.runner);
            let semaphore = Arc::clone(&semaphore);
            let accumulator = Arc::clone(&accumulator);
            let path = path.clone();

            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => runner
                        .execute(&ctx, &invocation, ExecutionMode::Silent)
                        .await
                        .map(|_| ()),
                    Err(_) => Err(GitError::Incomplete("fetch pool closed".to_string())),
                };
                if let Err(e) = &result {
                    warn!(path = %path, error = %e, "submodule fetch failed");
                }
                accumulator
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .record(path, result);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "submodule task aborted");
            }
        }

        let mut outcome = std::mem::take(
            &mut *accumulator
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for path in paths {
            if !outcome.attempted.contains(&path) {
                outcome.record(
                    path,
                    Err(GitError::Incomplete("task ended before recording".to_string())),
                );
            }
        }
        outcome
    }
}
