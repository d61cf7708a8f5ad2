// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          GitDeskError (~24 bytes)
//!                  |
//!     +--------+---+----+-------+
//!     v        v        v       v
//!    Git    Config  Process  Io/Other
//!    Box     Box      Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     InvalidRepository, CommandFailed, ProtectedBranch, RunnerBusy,
//!           InvalidBranchName, CurrentBranch, UncommittedChanges, NoRemotes
//!   Config  InvalidValue, InvalidPattern
//!   Process ExecutableNotFound, SpawnFailed, Timeout, InvalidWorkingDir,
//!           EmptyCommand
//! ```
//!
//! Subprocess and decoding failures never escape the core as errors: the
//! executor renders them into failure tuples. These types describe those
//! failures and carry the CLI layer's own errors.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`GitDeskError`].
pub type GitDeskResult<T> = std::result::Result<T, GitDeskError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum GitDeskError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl GitDeskError {
    /// Create a generic [`GitDeskError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for GitDeskError {
                fn from(err: $error) -> Self {
                    GitDeskError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path is missing or has no `.git` entry.
    #[error("not a git repository: {path}")]
    InvalidRepository { path: String },

    /// Git command ran and exited non-zero (or could not run at all).
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Destructive operation on a protected branch without confirmation.
    #[error("branch '{branch}' is protected")]
    ProtectedBranch { branch: String },

    /// A command is already in flight.
    #[error("another git command is still running")]
    RunnerBusy,

    /// Name git would reject as a branch.
    #[error("invalid branch name '{name}': {reason}")]
    InvalidBranchName { name: String, reason: String },

    /// The checked-out branch cannot be deleted.
    #[error("cannot delete the current branch '{branch}'")]
    CurrentBranch { branch: String },

    /// Switching would carry uncommitted work along.
    #[error("the working tree has uncommitted changes")]
    UncommittedChanges,

    /// The repository has no remotes to push to.
    #[error("no remotes configured")]
    NoRemotes,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Exclusion pattern is not a valid glob.
    #[error("invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Working directory does not exist.
    #[error("working directory does not exist: {path}")]
    InvalidWorkingDir { path: String },

    /// Empty argument vector.
    #[error("no command given")]
    EmptyCommand,
}

#[cfg(test)]
mod tests;
