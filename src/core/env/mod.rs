// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! Env (copy-on-write Arc<BTreeMap<EnvKey, String>>)
//! Sources: current_env(), Env::new(), Env::from_map()
//! Ops: set/get/remove/overlay
//! ```
//!
//! - **Case-insensitive keys on Windows**, exact match elsewhere
//! - **Copy-on-write**: clones share data until modified, so one base
//!   environment can back many concurrent git invocations
//! - **Sorted**: iteration order is deterministic

pub mod container;
pub mod types;

#[cfg(test)]
mod tests;

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    let vars = std::env::vars().collect();
    container::Env::from_map(vars)
}
