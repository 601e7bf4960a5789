// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Encoding of configuration overrides into git's environment protocol.
//!
//! ```text
//! { "b.key" = "2", "a.key" = "1" }
//!         |  sorted by key
//!         v
//! GIT_CONFIG_COUNT=2
//! GIT_CONFIG_KEY_0=a.key    GIT_CONFIG_VALUE_0=1
//! GIT_CONFIG_KEY_1=b.key    GIT_CONFIG_VALUE_1=2
//! ```
//!
//! See `git help config`, section ENVIRONMENT.

use std::collections::BTreeMap;

use crate::core::env::container::Env;

pub const COUNT_VAR: &str = "GIT_CONFIG_COUNT";
const KEY_PREFIX: &str = "GIT_CONFIG_KEY_";
const VALUE_PREFIX: &str = "GIT_CONFIG_VALUE_";

/// Name of the variable holding the key at `index`.
#[must_use]
pub fn key_var(index: usize) -> String {
    format!("{KEY_PREFIX}{index}")
}

/// Name of the variable holding the value at `index`.
#[must_use]
pub fn value_var(index: usize) -> String {
    format!("{VALUE_PREFIX}{index}")
}

/// Encodes configuration overrides as `GIT_CONFIG_*` environment variables.
///
/// Keys are sorted before indices are assigned, so the same logical
/// configuration always produces the same environment. When a key appears
/// more than once, the last value wins.
pub fn encode_config_env<I, K, V>(entries: I) -> Env
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let sorted: BTreeMap<String, String> = entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let mut env = Env::new();
    env.set(COUNT_VAR, sorted.len().to_string());
    for (index, (key, value)) in sorted.into_iter().enumerate() {
        env.set(key_var(index), key);
        env.set(value_var(index), value);
    }
    env
}
