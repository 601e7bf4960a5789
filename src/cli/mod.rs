// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitdrive using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitdrive [global options] <command>
//! sync | status | tracking | exec | config-env
//! options | inis | version
//! ```

pub mod git;
pub mod global;


use crate::cli::git::{ConfigEnvArgs, ExecArgs, StatusArgs, SyncArgs, TrackingArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Multi-repository git control layer.
///
/// Drives the git CLI for a superproject and its submodules.
#[derive(Debug, Parser)]
#[command(
    name = "gitdrive",
    author,
    version,
    about = "Multi-repository git control layer",
    long_about = "gitdrive Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Drives the git CLI for a superproject and its submodules.\n\n\
                  `gitdrive sync` initializes and fetches every submodule that\n\
                  is not checked out yet. See `gitdrive <command> --help` for\n\
                  more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  gitdrive reads `gitdrive.toml` from the working directory if\n\
                  present, then every --config file in order, then GITDRIVE_*\n\
                  environment variables (GITDRIVE_GIT__SUBMODULE_JOBS=8), and\n\
                  finally --set overrides. Later sources win."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,

    /// Initializes and fetches every uninitialized submodule.
    Sync(SyncArgs),

    /// Lists submodules with their state.
    Status(StatusArgs),

    /// Resolves the remote branch the current branch ultimately tracks.
    Tracking(TrackingArgs),

    /// Runs one git command with gitdrive's configuration injected.
    Exec(ExecArgs),

    /// Prints the GIT_CONFIG_* variables encoding the given overrides.
    #[command(name = "config-env")]
    ConfigEnv(ConfigEnvArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
