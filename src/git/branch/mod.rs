// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for `git branch -a --no-color` and `git remote`.
//!
//! ```text
//! "* main"                      current, local
//! "  feature/x"                 local
//! "  remotes/origin/main"       remote "origin/main"
//! "  remotes/origin/HEAD -> .." skipped
//! "* (HEAD detached at 1a2b3c)" skipped, becomes current verbatim
//! ```
//!
//! Order follows git's output. Duplicates are kept.

use serde::Serialize;

use crate::error::GitError;

const REMOTES_PREFIX: &str = "remotes/";
const SYMREF_ARROW: &str = " -> ";
const DETACHED_MARKER: &str = "HEAD detached";

/// Characters git refuses in a ref name.
const INVALID_BRANCH_CHARS: [char; 8] = [' ', '~', '^', ':', '?', '*', '[', '\\'];

/// Sequences git refuses in a ref name.
const INVALID_BRANCH_SEQUENCES: [&str; 3] = ["..", "//", "@{"];

/// Branches of the active repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub current: Option<String>,
    /// `current` was not marked by git and is the first local branch.
    pub current_is_guess: bool,
    pub local: Vec<String>,
    pub remote: Vec<String>,
}

impl BranchInfo {
    /// The current branch only if git marked it.
    #[must_use]
    pub fn known_current(&self) -> Option<&str> {
        if self.current_is_guess {
            None
        } else {
            self.current.as_deref()
        }
    }

    /// Local name to check out for `target`.
    ///
    /// A remote-tracking name such as `origin/x` maps to `x`, so git creates
    /// a tracking branch instead of detaching HEAD. Local names win.
    #[must_use]
    pub fn checkout_name<'a>(&self, target: &'a str) -> &'a str {
        if self.local.iter().any(|name| name == target) {
            return target;
        }
        match target.split_once('/') {
            Some((_, branch)) if self.remote.iter().any(|name| name == target) => branch,
            _ => target,
        }
    }
}

/// Checks `name` before it is handed to `checkout -b` or `branch`.
///
/// # Errors
///
/// Returns `GitError::InvalidBranchName` naming the first rule broken.
pub fn validate_branch_name(name: &str) -> Result<(), GitError> {
    let invalid = |reason: String| {
        Err(GitError::InvalidBranchName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty".to_string());
    }
    if name.starts_with('-') {
        return invalid("must not start with '-'".to_string());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return invalid("must not start or end with '/'".to_string());
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_control() || INVALID_BRANCH_CHARS.contains(c))
    {
        return invalid(format!("contains {c:?}"));
    }
    if let Some(seq) = INVALID_BRANCH_SEQUENCES.iter().find(|seq| name.contains(*seq)) {
        return invalid(format!("contains '{seq}'"));
    }
    if name.ends_with('.') || name.ends_with(".lock") {
        return invalid("must not end with '.' or '.lock'".to_string());
    }
    if name == "@" || name.split('/').any(|part| part.starts_with('.')) {
        return invalid("reserved name or component".to_string());
    }
    Ok(())
}

/// Parses branch listing output. Never fails.
#[must_use]
pub fn parse_branches(output: &str) -> BranchInfo {
    let mut info = BranchInfo::default();

    for line in output.lines() {
        let mut name = line.trim();
        if name.is_empty() {
            continue;
        }

        let is_current = if let Some(rest) = name.strip_prefix('*') {
            name = rest.trim();
            true
        } else {
            false
        };

        if name.contains(DETACHED_MARKER) || name.contains(SYMREF_ARROW) {
            if is_current {
                info.current = Some(name.to_string());
            }
            continue;
        }

        if let Some(rest) = name.strip_prefix(REMOTES_PREFIX) {
            match remote_display_name(rest) {
                Some(remote) => info.remote.push(remote),
                None => tracing::trace!(line = %line, "dropping malformed remote branch"),
            }
            continue;
        }

        if is_current {
            info.current = Some(name.to_string());
        }
        info.local.push(name.to_string());
    }

    if info.current.is_none()
        && let Some(first) = info.local.first()
    {
        info.current = Some(first.clone());
        info.current_is_guess = true;
    }

    info
}

/// `origin/feature/x` from the text after `remotes/`.
fn remote_display_name(rest: &str) -> Option<String> {
    let (remote, branch) = rest.split_once('/')?;
    if remote.is_empty() || branch.is_empty() {
        return None;
    }
    Some(format!("{remote}/{branch}"))
}

/// Parses `git remote` output into remote names, in order.
#[must_use]
pub fn parse_remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
