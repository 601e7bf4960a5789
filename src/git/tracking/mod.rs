// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolution of a branch's ultimate remote-tracking branch.
//!
//! ```text
//! feature --remote=.--> develop --remote=.--> main --remote=origin--> refs/heads/trunk
//!                                                                        |
//!                                        "origin/trunk" minus "origin/"  v
//!                                                                     "trunk"
//! ```
//!
//! Links are read from `branch.<name>.remote` / `branch.<name>.merge` on
//! every call; nothing is cached.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use super::context::ExecutionContext;
use super::ops;
use super::runner::CommandRunner;
use crate::error::{GitError, GitResult};

/// Remote name git records for an upstream that is a local branch.
pub const LOCAL_REMOTE: &str = ".";

/// Upstream configuration of one local branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingLink {
    branch: String,
    remote: Option<String>,
    merge: Option<String>,
}

impl TrackingLink {
    #[must_use]
    pub const fn new(branch: String, remote: Option<String>, merge: Option<String>) -> Self {
        Self {
            branch,
            remote,
            merge,
        }
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    #[must_use]
    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    /// Returns the upstream ref as configured, e.g. `refs/heads/main`.
    #[must_use]
    pub fn merge(&self) -> Option<&str> {
        self.merge.as_deref()
    }

    /// Returns the upstream branch name without `refs/heads/`.
    #[must_use]
    pub fn upstream_branch(&self) -> Option<&str> {
        self.merge
            .as_deref()
            .map(|merge| merge.strip_prefix("refs/heads/").unwrap_or(merge))
    }

    /// Returns true when the upstream is another local branch.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.remote.as_deref() == Some(LOCAL_REMOTE)
    }

    /// Returns true when both remote and merge are configured.
    #[must_use]
    pub const fn has_upstream(&self) -> bool {
        self.remote.is_some() && self.merge.is_some()
    }
}

/// Follows local tracking links until a remote-tracking branch is reached.
pub struct TrackingResolver<R> {
    runner: Arc<R>,
    ctx: ExecutionContext,
}

impl<R: CommandRunner> TrackingResolver<R> {
    pub const fn new(runner: Arc<R>, ctx: ExecutionContext) -> Self {
        Self { runner, ctx }
    }

    /// Reads the tracking link of `branch` from the repository config.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Execution` if git config cannot be read.
    pub async fn link(&self, branch: &str) -> GitResult<TrackingLink> {
        let remote =
            ops::config_get(self.runner.as_ref(), &self.ctx, &format!("branch.{branch}.remote"))
                .await?;
        let merge =
            ops::config_get(self.runner.as_ref(), &self.ctx, &format!("branch.{branch}.merge"))
                .await?;
        trace!(branch, ?remote, ?merge, "tracking link");
        Ok(TrackingLink::new(branch.to_string(), remote, merge))
    }

    /// Returns every link walked from `start`, ending at the first one that
    /// names a remote or has no upstream.
    ///
    /// # Errors
    ///
    /// Returns `GitError::TrackingCycle` if a local branch is visited twice.
    pub async fn chain(&self, start: &str) -> GitResult<Vec<TrackingLink>> {
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut links = Vec::new();
        let mut branch = start.to_string();

        loop {
            if !visited.insert(branch.clone()) {
                order.push(branch);
                return Err(GitError::TrackingCycle { chain: order });
            }
            order.push(branch.clone());

            let link = self.link(&branch).await?;
            let next = match (link.is_local(), link.upstream_branch()) {
                (true, Some(upstream)) => Some(upstream.to_string()),
                _ => None,
            };
            links.push(link);
            match next {
                Some(upstream) => branch = upstream,
                None => return Ok(links),
            }
        }
    }

    /// Resolves the remote-tracking branch of the current branch.
    ///
    /// Returns an empty string when HEAD is detached or no remote upstream
    /// is configured anywhere along the chain.
    ///
    /// # Errors
    ///
    /// Returns `GitError::TrackingCycle` for cyclic local tracking and
    /// `GitError::Execution` if git cannot be queried.
    pub async fn resolve_remote_tracking_branch(&self) -> GitResult<String> {
        let Some(current) = ops::current_branch(self.runner.as_ref(), &self.ctx).await? else {
            debug!("detached HEAD has no tracking branch");
            return Ok(String::new());
        };
        self.resolve_from(&current).await
    }

    /// Resolves the remote-tracking branch of `branch`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve_remote_tracking_branch`].
    pub async fn resolve_from(&self, branch: &str) -> GitResult<String> {
        let links = self.chain(branch).await?;
        let Some(last) = links.last() else {
            return Ok(String::new());
        };
        let (Some(remote), Some(upstream)) = (last.remote(), last.upstream_branch()) else {
            debug!(branch, "no upstream configured");
            return Ok(String::new());
        };
        let tracking_ref = format!("{remote}/{upstream}");
        let resolved = upstream.to_string();
        debug!(branch, %tracking_ref, %resolved, "resolved tracking branch");
        Ok(resolved)
    }
}
