// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! [global]  output_log_level, file_log_level, log_file
//! [git]     executable, user_name, user_email, offload,
//!           submodule_jobs, [git.config] key = value
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::git::runner::Identity;
use crate::git::submodule::{DEFAULT_JOBS, MAX_JOBS};
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Settings applied to every git invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Path to git; looked up in `PATH` when unset.
    pub executable: Option<PathBuf>,
    /// Author and committer name. Requires `user_email`.
    pub user_name: Option<String>,
    /// Author and committer email. Requires `user_name`.
    pub user_email: Option<String>,
    /// Restrict fetch transports to https.
    pub offload: bool,
    /// Concurrent submodule fetches.
    pub submodule_jobs: usize,
    /// Extra `-c`-style overrides for every invocation.
    pub config: BTreeMap<String, String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: None,
            user_name: None,
            user_email: None,
            offload: false,
            submodule_jobs: DEFAULT_JOBS,
            config: BTreeMap::new(),
        }
    }
}

impl GitConfig {
    #[must_use]
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// Returns the configured identity when both name and email are set.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match (&self.user_name, &self.user_email) {
            (Some(name), Some(email)) => Some(Identity::new(name.as_str(), email.as_str())),
            _ => None,
        }
    }

    #[must_use]
    pub const fn offload(&self) -> bool {
        self.offload
    }

    #[must_use]
    pub const fn submodule_jobs(&self) -> usize {
        self.submodule_jobs
    }

    #[must_use]
    pub const fn config(&self) -> &BTreeMap<String, String> {
        &self.config
    }

    /// Checks values the deserializer cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a job count outside
    /// `1..=MAX_JOBS`, a half-specified identity, or an empty override key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            section: "git".to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.submodule_jobs == 0 {
            return Err(invalid("submodule_jobs", "must be at least 1"));
        }
        if self.submodule_jobs > MAX_JOBS {
            return Err(invalid(
                "submodule_jobs",
                &format!("must be at most {MAX_JOBS}"),
            ));
        }
        match (&self.user_name, &self.user_email) {
            (Some(_), None) => {
                return Err(invalid("user_email", "required when user_name is set"));
            }
            (None, Some(_)) => {
                return Err(invalid("user_name", "required when user_email is set"));
            }
            _ => {}
        }
        if let Some(key) = self.config.keys().find(|k| k.trim().is_empty() || !k.contains('.')) {
            return Err(invalid(
                "config",
                &format!("override key '{key}' must look like 'section.name'"),
            ));
        }
        Ok(())
    }
}
