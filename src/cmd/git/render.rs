// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text and JSON views of parsed results.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::Config;
use crate::core::runner::CommandResult;
use crate::git::{BranchInfo, GitFacade, StatusEntry, StatusLists};

/// Status lists after exclusions and the display limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub staged: Vec<StatusEntry>,
    pub unstaged: Vec<StatusEntry>,
    /// Unstaged entries hidden by exclusion patterns.
    pub excluded: usize,
    /// Entries cut by the display limit.
    pub truncated: usize,
}

impl StatusView {
    /// Staged entries are always shown; only unstaged ones can be excluded.
    #[must_use]
    pub fn new(lists: StatusLists, config: &Config) -> Self {
        let mut staged = lists.staged;
        let mut unstaged = config.git.filter_excluded(&lists.unstaged);
        let excluded = lists.unstaged.len() - unstaged.len();
        let truncated = config.display.truncate(&mut staged) + config.display.truncate(&mut unstaged);
        Self {
            staged,
            unstaged,
            excluded,
            truncated,
        }
    }

    #[must_use]
    pub fn unfiltered(lists: StatusLists) -> Self {
        Self {
            staged: lists.staged,
            unstaged: lists.unstaged,
            excluded: 0,
            truncated: 0,
        }
    }
}

#[must_use]
pub fn render_status(view: &StatusView) -> String {
    let mut out = String::new();
    if view.staged.is_empty() && view.unstaged.is_empty() {
        out.push_str("nothing to show");
    }
    for (title, entries) in [("Staged", &view.staged), ("Unstaged", &view.unstaged)] {
        if entries.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{title}:");
        for entry in entries {
            let _ = write!(out, "\n  {} {}", entry.code, entry.path);
        }
    }
    if view.excluded > 0 {
        let _ = write!(out, "\n({} excluded by patterns)", view.excluded);
    }
    if view.truncated > 0 {
        let _ = write!(out, "\n({} more not shown)", view.truncated);
    }
    out
}

/// `*` marks the current branch, `?` a guessed one.
#[must_use]
pub fn render_branches(info: &BranchInfo) -> String {
    let mut lines = Vec::new();
    let current = info.current.as_deref();

    if let Some(current) = current
        && !info.local.iter().any(|name| name == current)
    {
        lines.push(format!("* {current}"));
    }
    for name in &info.local {
        let marker = match current {
            Some(current) if current == name && info.current_is_guess => '?',
            Some(current) if current == name => '*',
            _ => ' ',
        };
        lines.push(format!("{marker} {name}"));
    }
    for name in &info.remote {
        lines.push(format!("  remotes/{name}"));
    }
    lines.join("\n")
}

/// Repository health as reported by `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub root: String,
    pub valid: bool,
    pub staged_changes: bool,
    pub uncommitted_changes: bool,
}

impl CheckReport {
    pub fn collect(facade: &mut GitFacade) -> Self {
        let valid = facade.is_git_repo();
        Self {
            root: facade.root().display().to_string(),
            valid,
            staged_changes: valid && facade.has_staged_changes(),
            uncommitted_changes: valid && facade.has_uncommitted_changes(),
        }
    }
}

#[must_use]
pub fn render_check(report: &CheckReport) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    format!(
        "repository:          {}\nvalid:               {}\nstaged changes:      {}\nuncommitted changes: {}",
        report.root,
        yes_no(report.valid),
        yes_no(report.staged_changes),
        yes_no(report.uncommitted_changes),
    )
}

/// JSON form of a finished action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    pub label: String,
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<&CommandResult> for ActionReport {
    fn from(result: &CommandResult) -> Self {
        Self {
            label: result.label.clone(),
            success: result.success,
            exit_code: result.exit_code,
            stdout: result.stdout.clone(),
            stderr: result.stderr.clone(),
        }
    }
}

/// stderr of a failed command, or its exit code when stderr is empty.
#[must_use]
pub fn failure_message(result: &CommandResult) -> String {
    let stderr = result.stderr.trim();
    if stderr.is_empty() {
        format!("exit code {}", result.exit_code)
    } else {
        stderr.to_string()
    }
}
