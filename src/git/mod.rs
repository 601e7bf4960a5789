// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git control layer.
//!
//! ```text
//!      submodule::SubmoduleSyncEngine   tracking::TrackingResolver   ops
//!                  \                           |                    /
//!                   v                          v                   v
//!              ,--------------------------------------------------,
//!              |  runner::CommandRunner (trait)                    |
//!              |  execute / execute_lines / execute_interactive    |
//!              '------------------------+-------------------------'
//!                                       |
//!                                       v
//!                                   GitRunner
//!          Invocation + ExecutionContext + encode_config_env
//!                                       |
//!                                       v
//!                       core::process::ProcessBuilder --> git
//! ```
//!
//! Option structs in [`options`] shape argument vectors; nothing here keeps
//! process-global state.

pub mod config_env;
pub mod context;
pub mod invocation;
pub mod ops;
pub mod options;
pub mod runner;
pub mod submodule;
pub mod tracking;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;
