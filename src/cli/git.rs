// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the git-facing commands.
//!
//! ```text
//! sync [--jobs N] [--depth N] [--force] [--json]
//!   → init + fetch every uninitialized submodule
//! status [--json]
//!   → parsed `git submodule status`
//! tracking [BRANCH]
//!   → remote branch HEAD (or BRANCH) ultimately tracks
//! exec [--interactive] -- ARGS...
//!   → one git invocation through the runner
//! config-env KEY=VALUE...
//!   → GIT_CONFIG_* variables for the given overrides
//! ```

use clap::Args;

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SyncArgs {
    /// Maximum concurrent submodule fetches (defaults to git.submodule_jobs).
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=1024))]
    pub jobs: Option<u32>,

    /// Shallow-fetch submodules to N commits.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: Option<u32>,

    /// Checks out submodules even if their work tree has local changes.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Follows each submodule's remote-tracking branch instead of the recorded commit.
    #[arg(long)]
    pub remote: bool,

    /// Prints the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Prints the entries as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `tracking` command.
#[derive(Debug, Clone, Default, Args)]
pub struct TrackingArgs {
    /// Starts from this branch instead of the checked-out one.
    #[arg(value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Prints every link of the tracking chain.
    #[arg(long)]
    pub chain: bool,
}

/// Arguments for the `exec` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ExecArgs {
    /// Connects git to the terminal so editors and prompts work.
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Git verb followed by its arguments.
    #[arg(
        value_name = "ARGS",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Arguments for the `config-env` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigEnvArgs {
    /// Configuration overrides.
    #[arg(value_name = "KEY=VALUE", required = true)]
    pub entries: Vec<String>,
}
