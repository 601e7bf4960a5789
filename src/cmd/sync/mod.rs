// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sync` command: initialize and fetch every uninitialized submodule.
//!
//! ```text
//! SubmoduleSyncEngine::synchronize()
//!        |
//!        v
//!   SyncOutcome --> SyncReport --> text lines | JSON
//!        |
//!        v
//!   into_result(): any failure --> Aggregate error, exit 1
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use super::GitSession;
use crate::cli::git::SyncArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::options::SubmoduleUpdateOptions;
use crate::git::submodule::{SubmoduleSyncEngine, SyncOutcome};

/// Printable summary of one sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    attempted: usize,
    succeeded: Vec<String>,
    failed: BTreeMap<String, String>,
}

impl SyncReport {
    #[must_use]
    pub fn from_outcome(outcome: &SyncOutcome) -> Self {
        Self {
            attempted: outcome.attempted().len(),
            succeeded: outcome.succeeded().iter().cloned().collect(),
            failed: outcome
                .failures()
                .iter()
                .map(|(path, error)| (path.clone(), error.to_string()))
                .collect(),
        }
    }

    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.attempted
    }

    #[must_use]
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    #[must_use]
    pub const fn failed(&self) -> &BTreeMap<String, String> {
        &self.failed
    }

    /// Human-readable lines, one per synchronized or failed path.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        if self.attempted == 0 {
            return vec!["all submodules are initialized".to_string()];
        }
        let mut lines = Vec::with_capacity(self.attempted + 1);
        lines.extend(self.succeeded.iter().map(|path| format!("ok      {path}")));
        lines.extend(
            self.failed
                .iter()
                .map(|(path, error)| format!("failed  {path}: {error}")),
        );
        lines.push(format!(
            "{} of {} submodule(s) synchronized",
            self.succeeded.len(),
            self.attempted
        ));
        lines
    }
}

/// Builds the per-path update options from the command line.
#[must_use]
pub fn update_options(args: &SyncArgs) -> SubmoduleUpdateOptions {
    SubmoduleUpdateOptions::builder()
        .maybe_depth(args.depth)
        .force(args.force)
        .remote(args.remote)
        .build()
}

/// Main handler for the sync command.
///
/// # Errors
///
/// Returns an error if the submodules cannot be listed or initialized, or if
/// any submodule failed to fetch. The report is printed before the error.
pub async fn run_sync_command(args: &SyncArgs, config: &Config, workdir: &Path) -> Result<()> {
    let session = GitSession::open(config, workdir, "sync")?;
    let jobs = args
        .jobs
        .map_or(config.git.submodule_jobs(), |jobs| {
            usize::try_from(jobs).unwrap_or(usize::MAX)
        });

    let engine = SubmoduleSyncEngine::new(session.runner(), session.ctx().clone())
        .with_jobs(jobs)
        .with_update_options(update_options(args));

    let outcome = engine
        .synchronize()
        .await
        .with_context(|| format!("failed to synchronize submodules in {}", workdir.display()))?;

    let report = SyncReport::from_outcome(&outcome);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize sync report")?
        );
    } else {
        for line in report.render_lines() {
            println!("{line}");
        }
    }

    outcome.into_result()?;
    Ok(())
}
