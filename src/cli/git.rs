// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for repository commands.
//!
//! ```text
//! status [--all]            branches     remotes     check
//! stage <PATH>...|--all     unstage <PATH>...        discard <PATH>...
//! commit -m MSG [--amend]
//! push [REMOTE] [BRANCH] [-u] | push --all-remotes
//! pull [REMOTE] [BRANCH]        fetch [REMOTE]
//! checkout BRANCH [-f]
//! branch {create NAME [-c] | delete NAME [-f] | delete-remote REMOTE BRANCH [-y]}
//! remote {add NAME URL | remove NAME}
//! ```

use clap::{Args, Subcommand};

#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Ignores exclusion patterns and the display limit.
    #[arg(short = 'a', long)]
    pub all: bool,
}

#[derive(Debug, Clone, Args)]
pub struct StageArgs {
    /// Files to stage.
    #[arg(value_name = "PATH", required_unless_present = "all")]
    pub paths: Vec<String>,

    /// Stages every visible change, including untracked files. Paths hidden
    /// by exclusion patterns stay unstaged.
    #[arg(short = 'A', long, conflicts_with = "paths")]
    pub all: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PathsArgs {
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long, value_name = "MSG")]
    pub message: String,

    /// Replaces the tip commit instead of adding a new one.
    #[arg(long)]
    pub amend: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    pub remote: Option<String>,

    pub branch: Option<String>,

    /// Records the remote branch as upstream.
    #[arg(short = 'u', long = "set-upstream")]
    pub set_upstream: bool,

    /// Pushes the current branch to every remote in turn.
    #[arg(long, conflicts_with_all = ["remote", "branch", "set_upstream"])]
    pub all_remotes: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PullArgs {
    pub remote: Option<String>,

    pub branch: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    pub remote: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutArgs {
    /// Local branch, or a remote-tracking one such as `origin/topic`.
    pub branch: String,

    /// Switches even with uncommitted changes.
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    #[command(subcommand)]
    pub subcommand: BranchSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum BranchSubcommand {
    /// Creates a local branch at HEAD after checking the name.
    Create {
        name: String,

        /// Switches to the new branch.
        #[arg(short = 'c', long)]
        checkout: bool,
    },

    /// Deletes a local branch other than the current one.
    Delete {
        name: String,

        /// Deletes even if not merged.
        #[arg(short = 'f', long)]
        force: bool,
    },

    /// Deletes a branch on a remote.
    #[command(name = "delete-remote")]
    DeleteRemote {
        remote: String,
        branch: String,

        /// Confirms deletion of a protected branch.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub subcommand: RemoteSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RemoteSubcommand {
    /// Adds a remote.
    Add { name: String, url: String },

    /// Removes a remote.
    Remove { name: String },
}
