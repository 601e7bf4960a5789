// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::current_env;
use crate::core::env::container::Env;
use std::collections::BTreeMap;

#[test]
fn test_env_basic_operations() {
    let mut env = Env::new();
    env.set("FOO", "bar");

    assert_eq!(env.get("FOO"), Some("bar"));
    assert_eq!(env.get("NOTEXIST"), None);
    assert_eq!(env.len(), 1);

    env.remove("FOO");
    assert!(env.is_empty());
}

#[cfg(windows)]
#[test]
fn test_env_case_insensitive_on_windows() {
    let mut env = Env::new();
    env.set("Path", "C:\\bin");
    assert_eq!(env.get("PATH"), Some("C:\\bin"));
}

#[cfg(not(windows))]
#[test]
fn test_env_case_sensitive_elsewhere() {
    let mut env = Env::new();
    env.set("FOO", "upper");
    env.set("foo", "lower");
    assert_eq!(env.get("FOO"), Some("upper"));
    assert_eq!(env.get("foo"), Some("lower"));
}

#[test]
fn test_env_copy_on_write() {
    let mut base = Env::new();
    base.set("SHARED", "1");

    let clone = base.clone();
    assert!(clone.shares_storage_with(&base));

    let mut modified = base.clone();
    modified.set("EXTRA", "2");

    assert!(!modified.shares_storage_with(&base));
    assert_eq!(base.get("EXTRA"), None);
    assert_eq!(modified.get("SHARED"), Some("1"));
}

#[test]
fn test_env_overlay_prefers_other() {
    let mut base: Env = [("A", "base"), ("B", "base")].into_iter().collect();
    let overrides: Env = [("B", "override"), ("C", "new")].into_iter().collect();

    base.overlay(&overrides);

    insta::assert_debug_snapshot!(base.to_map(), @r#"
    {
        "A": "base",
        "B": "override",
        "C": "new",
    }
    "#);
}

#[test]
fn test_env_from_map_iterates_sorted() {
    let mut map = BTreeMap::new();
    map.insert("ZED".to_string(), "z".to_string());
    map.insert("ALPHA".to_string(), "a".to_string());

    let env = Env::from_map(map);
    let keys: Vec<_> = env.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["ALPHA", "ZED"]);
}

#[test]
fn test_current_env_not_empty() {
    let env = current_env();
    assert!(!env.is_empty());
}
