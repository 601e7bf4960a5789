// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for `git submodule status` output.
//!
//! ```text
//! -91d92f5732440651499ea7adfa60a362a2bade39 third_party/libc-tests
//! ^ marker  ^ 40 hex object id              ^ path
//!  91d92f5732440651499ea7adfa60a362a2bade39 vendor/zlib (v1.3.1)
//!                                                        ^ annotation
//! ```
//!
//! Uninitialized (`-`) lines carry no annotation; their path is the rest of
//! the line. A single line that does not fit fails the whole listing.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{GitError, GitResult};

const STATUS_LINE: &str = r"^([-+U ]?)([0-9a-f]{40}) (.+?)(?: \(([^()]*)\))?$";

fn status_line_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(STATUS_LINE).ok()).as_ref()
}

/// Checkout state of a submodule, from the status marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmoduleState {
    /// `-`: registered but not initialized.
    Uninitialized,
    /// No marker: checked out at the recorded commit.
    InitializedSameRevision,
    /// `+`: checked out at a different commit.
    InitializedDifferentRevision,
    /// `U`: merge conflicts.
    MergeConflict,
}

impl SubmoduleState {
    const fn from_marker(marker: &str) -> Option<Self> {
        match marker.as_bytes() {
            b"-" => Some(Self::Uninitialized),
            b"" | b" " => Some(Self::InitializedSameRevision),
            b"+" => Some(Self::InitializedDifferentRevision),
            b"U" => Some(Self::MergeConflict),
            _ => None,
        }
    }

    /// Returns the marker character git prints for this state.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Uninitialized => '-',
            Self::InitializedSameRevision => ' ',
            Self::InitializedDifferentRevision => '+',
            Self::MergeConflict => 'U',
        }
    }
}

/// One parsed `git submodule status` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmoduleEntry {
    state: SubmoduleState,
    object_id: String,
    path: String,
    branch_hint: Option<String>,
}

impl SubmoduleEntry {
    #[must_use]
    pub const fn state(&self) -> SubmoduleState {
        self.state
    }

    #[must_use]
    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the `git describe` annotation, if git printed one.
    #[must_use]
    pub fn branch_hint(&self) -> Option<&str> {
        self.branch_hint.as_deref()
    }

    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        self.state == SubmoduleState::Uninitialized
    }
}

/// Parses a single status line.
///
/// # Errors
///
/// Returns `GitError::Parse` if the line does not match the status grammar.
pub fn parse_status_line(line: &str) -> GitResult<SubmoduleEntry> {
    let regex = status_line_regex().ok_or_else(|| GitError::Parse {
        line: line.to_string(),
        reason: "status grammar failed to compile",
    })?;
    let captures = regex.captures(line).ok_or_else(|| GitError::Parse {
        line: line.to_string(),
        reason: "expected `[-+U ]<40 hex object id> <path> [(annotation)]`",
    })?;

    let marker = captures.get(1).map_or("", |m| m.as_str());
    let state = SubmoduleState::from_marker(marker).ok_or_else(|| GitError::Parse {
        line: line.to_string(),
        reason: "unknown state marker",
    })?;
    let field = |index: usize| captures.get(index).map(|m| m.as_str().to_string());

    // git never annotates `-` lines, so the path runs to the end of the line.
    let (path, branch_hint) = if state == SubmoduleState::Uninitialized {
        let rest = captures
            .get(2)
            .and_then(|oid| line.get(oid.end() + 1..))
            .map(str::to_string);
        (rest, None)
    } else {
        (field(3), field(4))
    };

    Ok(SubmoduleEntry {
        state,
        object_id: field(2).unwrap_or_default(),
        path: path.unwrap_or_default(),
        branch_hint,
    })
}

/// Parses every status line; the first malformed line fails the listing.
///
/// # Errors
///
/// Returns `GitError::Parse` for the first line that does not match.
pub fn parse_status<S: AsRef<str>>(lines: &[S]) -> GitResult<Vec<SubmoduleEntry>> {
    lines
        .iter()
        .map(|line| parse_status_line(line.as_ref()))
        .collect()
}
