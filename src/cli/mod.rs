// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitdeck [global options] <command>
//! version | options | inis
//! status | branches | remotes | check
//! stage | unstage | discard | commit
//! push | pull | fetch | checkout
//! branch {create|delete|delete-remote}
//! remote {add|remove}
//! ```

pub mod git;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::git::{
    BranchArgs, CheckoutArgs, CommitArgs, FetchArgs, PathsArgs, PullArgs, PushArgs, RemoteArgs,
    StageArgs, StatusArgs,
};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Headless front-end over the git command line.
#[derive(Debug, Parser)]
#[command(
    name = "gitdeck",
    author,
    version,
    about = "Git working-tree and branch front-end",
    long_about = "gitdeck Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Shows staged and unstaged changes, branches and remotes, and\n\
                  runs one git command at a time on the repository given by -C.",
    after_help = "CONFIGURATION:\n\n\
                  gitdeck reads `gitdeck.toml` from the repository root if it\n\
                  exists, then every --ini file, then GITDECK_<SECTION>__<KEY>\n\
                  environment variables, then --set overrides."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files in use.
    Inis,

    /// Shows staged and unstaged changes.
    Status(StatusArgs),

    /// Lists local and remote branches.
    Branches,

    /// Lists remotes.
    Remotes,

    /// Reports repository validity and pending changes.
    Check,

    /// Adds files to the index.
    Stage(StageArgs),

    /// Removes files from the index, keeping working-tree changes.
    Unstage(PathsArgs),

    /// Reverts working-tree changes to the index.
    Discard(PathsArgs),

    /// Records staged changes.
    Commit(CommitArgs),

    /// Pushes to a remote.
    Push(PushArgs),

    /// Pulls from a remote.
    Pull(PullArgs),

    /// Fetches from a remote.
    Fetch(FetchArgs),

    /// Switches branches.
    Checkout(CheckoutArgs),

    /// Creates or deletes branches.
    Branch(BranchArgs),

    /// Adds or removes remotes.
    Remote(RemoteArgs),
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or help/version was
/// requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
