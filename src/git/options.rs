// gitdrive: multi-repository git control layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-operation option structs.
//!
//! ```text
//! CloneOptions::builder().depth(1).branch("main").build().to_args()
//!   --> ["--quiet", "--depth", "1", "--branch", "main"]
//! ```
//!
//! Every field has a documented default; callers only name what differs.
//! Positional operands (urls, paths, targets) are passed to the operation,
//! not stored here.

use bon::Builder;

fn push_depth(args: &mut Vec<String>, depth: Option<u32>) {
    if let Some(depth) = depth {
        args.push("--depth".to_string());
        args.push(depth.to_string());
    }
}

fn push_flag(args: &mut Vec<String>, enabled: bool, flag: &str) {
    if enabled {
        args.push(flag.to_string());
    }
}

/// Options for `git clone`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CloneOptions {
    /// Branch or tag to check out instead of the remote HEAD.
    #[builder(into)]
    pub branch: Option<String>,
    /// Shallow clone depth.
    pub depth: Option<u32>,
    #[builder(default)]
    pub single_branch: bool,
    /// Off by default; submodules are synchronized separately.
    #[builder(default)]
    pub recurse_submodules: bool,
    #[builder(default)]
    pub bare: bool,
    #[builder(default = true)]
    pub quiet: bool,
}

impl CloneOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.quiet, "--quiet");
        push_flag(&mut args, self.bare, "--bare");
        push_depth(&mut args, self.depth);
        if let Some(branch) = &self.branch {
            args.push("--branch".to_string());
            args.push(branch.clone());
        }
        push_flag(&mut args, self.single_branch, "--single-branch");
        push_flag(&mut args, self.recurse_submodules, "--recurse-submodules");
        args
    }
}

/// Options for `git fetch`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct FetchOptions {
    /// Remote to fetch from; git's default remote when unset.
    #[builder(into)]
    pub remote: Option<String>,
    #[builder(default)]
    pub refspecs: Vec<String>,
    pub depth: Option<u32>,
    #[builder(default)]
    pub prune: bool,
    #[builder(default)]
    pub tags: bool,
    #[builder(default)]
    pub force: bool,
    #[builder(default = true)]
    pub quiet: bool,
}

impl FetchOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.quiet, "--quiet");
        push_depth(&mut args, self.depth);
        push_flag(&mut args, self.prune, "--prune");
        push_flag(&mut args, self.tags, "--tags");
        push_flag(&mut args, self.force, "--force");
        if let Some(remote) = &self.remote {
            args.push(remote.clone());
            args.extend(self.refspecs.iter().cloned());
        }
        args
    }
}

/// Options for `git checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CheckoutOptions {
    /// Discard local changes.
    #[builder(default)]
    pub force: bool,
    #[builder(default)]
    pub detach: bool,
    #[builder(default = true)]
    pub quiet: bool,
}

impl CheckoutOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.quiet, "--quiet");
        push_flag(&mut args, self.force, "--force");
        push_flag(&mut args, self.detach, "--detach");
        args
    }
}

/// Options for `git branch <name>`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct BranchOptions {
    /// Commit the branch starts at; HEAD when unset.
    #[builder(into)]
    pub start_point: Option<String>,
    /// Reset the branch if it already exists.
    #[builder(default)]
    pub force: bool,
    /// Make the start point the branch's upstream.
    #[builder(default)]
    pub track: bool,
}

impl BranchOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.force, "--force");
        if self.track {
            args.push("--track".to_string());
        } else {
            args.push("--no-track".to_string());
        }
        args
    }
}

/// Options for `git push`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct PushOptions {
    #[builder(into)]
    pub remote: Option<String>,
    #[builder(default)]
    pub refspecs: Vec<String>,
    #[builder(default)]
    pub force: bool,
    #[builder(default)]
    pub set_upstream: bool,
    #[builder(default)]
    pub tags: bool,
    #[builder(default = true)]
    pub quiet: bool,
}

impl PushOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.quiet, "--quiet");
        push_flag(&mut args, self.force, "--force");
        push_flag(&mut args, self.set_upstream, "--set-upstream");
        push_flag(&mut args, self.tags, "--tags");
        if let Some(remote) = &self.remote {
            args.push(remote.clone());
            args.extend(self.refspecs.iter().cloned());
        }
        args
    }
}

/// Options for `git commit`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CommitOptions {
    /// Commit message; without one git opens the editor.
    #[builder(into)]
    pub message: Option<String>,
    /// Stage modified and deleted tracked files first.
    #[builder(default)]
    pub all: bool,
    #[builder(default)]
    pub allow_empty: bool,
    #[builder(default)]
    pub amend: bool,
    #[builder(default)]
    pub no_verify: bool,
}

impl CommitOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.all, "--all");
        push_flag(&mut args, self.allow_empty, "--allow-empty");
        push_flag(&mut args, self.amend, "--amend");
        push_flag(&mut args, self.no_verify, "--no-verify");
        if let Some(message) = &self.message {
            args.push("--message".to_string());
            args.push(message.clone());
        }
        args
    }

    /// Returns true when git will need the user's editor.
    #[must_use]
    pub const fn needs_editor(&self) -> bool {
        self.message.is_none()
    }
}

/// Options for the per-path `git submodule update` run by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct SubmoduleUpdateOptions {
    pub depth: Option<u32>,
    /// Check out even if the submodule's work tree has local changes.
    #[builder(default)]
    pub force: bool,
    /// Follow the submodule's remote-tracking branch instead of the recorded commit.
    #[builder(default)]
    pub remote: bool,
    #[builder(default = true)]
    pub quiet: bool,
}

impl SubmoduleUpdateOptions {
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        push_flag(&mut args, self.quiet, "--quiet");
        push_depth(&mut args, self.depth);
        push_flag(&mut args, self.force, "--force");
        push_flag(&mut args, self.remote, "--remote");
        args
    }
}

macro_rules! default_from_builder {
    ($($ty:ty),+ $(,)?) => {
        $(impl Default for $ty {
            fn default() -> Self {
                Self::builder().build()
            }
        })+
    };
}

default_from_builder!(
    CloneOptions,
    FetchOptions,
    CheckoutOptions,
    BranchOptions,
    PushOptions,
    CommitOptions,
    SubmoduleUpdateOptions,
);
