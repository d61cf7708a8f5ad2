// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig, GitConfig, DisplayConfig
//! ```
//!
//! Exclusion patterns and protected branches are advisory: the front-end
//! applies them, parsers never see them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wax::{Glob, Program as _};

use crate::error::ConfigError;
use crate::git::status::StatusEntry;
use crate::logging::LogLevel;

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
        }
    }
}

/// Options consulted around git invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Upper bound on a single git command, in seconds.
    pub timeout_secs: u64,
    /// Globs hiding status entries from display.
    pub exclude_patterns: Vec<String>,
    /// Branches whose remote deletion needs confirmation.
    pub protected_branches: Vec<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            exclude_patterns: Vec::new(),
            protected_branches: vec!["main".to_string(), "master".to_string()],
        }
    }
}

impl GitConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// # Errors
    ///
    /// Returns the first invalid value or pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for pattern in &self.exclude_patterns {
            if let Some(Err(message)) = Exclusion::compile(pattern) {
                return Err(ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    message,
                });
            }
        }
        Ok(())
    }

    /// Patterns that compile; invalid ones are rejected by `validate`.
    fn exclusions(&self) -> Vec<Exclusion> {
        self.exclude_patterns
            .iter()
            .filter_map(|pattern| Exclusion::compile(pattern)?.ok())
            .collect()
    }

    /// Whether `path` is hidden by an exclusion pattern.
    ///
    /// A pattern ending in `/` hides everything under a matching directory;
    /// any other pattern is matched against the whole path and the file name.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        matches_any(&self.exclusions(), path)
    }

    /// Entries not hidden by exclusion patterns, in order.
    #[must_use]
    pub fn filter_excluded(&self, entries: &[StatusEntry]) -> Vec<StatusEntry> {
        let exclusions = self.exclusions();
        if exclusions.is_empty() {
            return entries.to_vec();
        }
        entries
            .iter()
            .filter(|entry| !matches_any(&exclusions, &entry.path))
            .cloned()
            .collect()
    }

    /// `main` protects both `main` and `origin/main`.
    #[must_use]
    pub fn is_protected_branch(&self, name: &str) -> bool {
        let bare = name.split_once('/').map_or(name, |(_, rest)| rest);
        self.protected_branches
            .iter()
            .any(|protected| protected == name || protected == bare)
    }
}

/// Forward slashes only, without leading `./`.
fn normalize_path(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}

/// A compiled exclusion pattern.
enum Exclusion {
    /// Matches the path or its file name.
    Entry(Glob<'static>),
    /// Matches anything below a directory matching the glob.
    Directory(Glob<'static>),
}

impl Exclusion {
    /// `None` for patterns that are empty once normalized.
    fn compile(pattern: &str) -> Option<Result<Self, String>> {
        let normalized = normalize_path(pattern.trim());
        let (expr, is_directory) = match normalized.strip_suffix('/') {
            Some(dir) => (dir.trim_end_matches('/'), true),
            None => (normalized.as_str(), false),
        };
        if expr.is_empty() {
            return None;
        }
        let glob = match Glob::new(expr) {
            Ok(glob) => glob.into_owned(),
            Err(e) => return Some(Err(e.to_string())),
        };
        Some(Ok(if is_directory {
            Self::Directory(glob)
        } else {
            Self::Entry(glob)
        }))
    }

    fn matches(&self, path: &str, file_name: &str) -> bool {
        match self {
            Self::Entry(glob) => glob.is_match(path) || glob.is_match(file_name),
            // Every proper ancestor, plus the entry itself when git lists it as `dir/`
            Self::Directory(glob) => path
                .match_indices('/')
                .any(|(end, _)| glob.is_match(&path[..end])),
        }
    }
}

fn matches_any(exclusions: &[Exclusion], path: &str) -> bool {
    let path = normalize_path(path);
    let file_name = Path::new(&path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(&path)
        .to_string();
    exclusions
        .iter()
        .any(|exclusion| exclusion.matches(&path, &file_name))
}

/// Display-only limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Entries shown per list; 0 shows everything.
    pub max_entries: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { max_entries: 500 }
    }
}

impl DisplayConfig {
    /// Truncates `items` to the display limit, returning how many were hidden.
    pub fn truncate<T>(&self, items: &mut Vec<T>) -> usize {
        if self.max_entries == 0 || items.len() <= self.max_entries {
            return 0;
        }
        let hidden = items.len() - self.max_entries;
        items.truncate(self.max_entries);
        hidden
    }
}
