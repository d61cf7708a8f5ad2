// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for `git status --porcelain=v1`.
//!
//! ```text
//! "XY path"
//!   X (index)    not ' ' or '?'        --> staged
//!   Y (worktree) not ' ', or XY == ??  --> unstaged
//! ```
//!
//! One line may land in both lists (a partially staged file). Malformed lines
//! are skipped; the parser never fails.

use serde::Serialize;

use crate::git::path::PathParser;

/// One file from the porcelain output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Two-character `XY` code, verbatim.
    pub code: String,
    pub path: String,
}

impl StatusEntry {
    pub fn new(code: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
        }
    }

    /// Index column.
    #[must_use]
    pub fn index_state(&self) -> char {
        self.code.chars().next().unwrap_or(' ')
    }

    /// Working-tree column.
    #[must_use]
    pub fn worktree_state(&self) -> char {
        self.code.chars().nth(1).unwrap_or(' ')
    }

    #[must_use]
    pub fn is_untracked(&self) -> bool {
        self.code == "??"
    }

    #[must_use]
    pub fn is_staged(&self) -> bool {
        !matches!(self.index_state(), ' ' | '?')
    }

    #[must_use]
    pub fn is_unstaged(&self) -> bool {
        self.worktree_state() != ' ' || self.is_untracked()
    }
}

/// Working-tree changes split by where they live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusLists {
    pub unstaged: Vec<StatusEntry>,
    pub staged: Vec<StatusEntry>,
}

impl StatusLists {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unstaged.is_empty() && self.staged.is_empty()
    }
}

/// Splits porcelain output into unstaged and staged entries, in output order.
pub fn parse_status(output: &str, paths: &mut PathParser) -> StatusLists {
    let mut lists = StatusLists::default();

    for line in output.lines() {
        let Some(entry) = parse_line(line, paths) else {
            continue;
        };
        if entry.is_staged() {
            lists.staged.push(entry.clone());
        }
        if entry.is_unstaged() {
            lists.unstaged.push(entry);
        }
    }

    lists
}

/// Parses `XY<space><path>`; the path is taken verbatim from offset 3.
fn parse_line(line: &str, paths: &mut PathParser) -> Option<StatusEntry> {
    // Branch header from `--branch`
    if line.starts_with("## ") {
        return None;
    }
    let code = line.get(..2)?;
    let raw = line.get(3..).filter(|raw| !raw.is_empty())?;
    if line.as_bytes().get(2) != Some(&b' ') {
        tracing::trace!(line = %line, "skipping malformed status line");
        return None;
    }
    Some(StatusEntry::new(code, paths.parse(raw)))
}
