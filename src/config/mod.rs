// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitdrive.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local gitdrive.toml (cwd)
//! 3. --config (repeatable)
//! 4. GITDRIVE_* env vars
//! 5. --set overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITDRIVE_GIT__OFFLOAD=true           → git.offload = true
//! GITDRIVE_GIT__SUBMODULE_JOBS=8       → git.submodule_jobs = 8
//! GITDRIVE_GLOBAL__OUTPUT_LOG_LEVEL=4  → global.output_log_level = 4
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Name of the optional configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "gitdrive.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GITDRIVE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git invocation settings.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitdrive::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitdrive.toml")
    ///     .with_env_prefix("GITDRIVE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates values that deserialization alone cannot check.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// One `key = value` line per option, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "git.executable".into(),
            self.git
                .executable
                .as_ref()
                .map_or_else(|| "(PATH)".to_string(), |p| p.display().to_string()),
        );
        options.insert(
            "git.user_name".into(),
            self.git.user_name.clone().unwrap_or_default(),
        );
        options.insert(
            "git.user_email".into(),
            self.git.user_email.clone().unwrap_or_default(),
        );
        options.insert("git.offload".into(), self.git.offload.to_string());
        options.insert(
            "git.submodule_jobs".into(),
            self.git.submodule_jobs.to_string(),
        );
        for (key, value) in &self.git.config {
            options.insert(format!("git.config.{key}"), value.clone());
        }
    }
}
