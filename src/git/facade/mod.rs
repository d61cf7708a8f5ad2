// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Public surface for front-ends.
//!
//! ```text
//!  front-end thread                               worker thread
//!  ----------------                               -------------
//!  request_status() --> AsyncRunner::submit ----> CommandExecutor::run
//!                                                       |
//!  next_event() <------- flume (CommandResult) ---------+
//!    run callback
//!    parse by CommandKind (path cache stays here)
//!    --> GitEvent::{Status, Branches, Remotes, Finished, Shutdown}
//!
//!  get_status() / has_staged_changes() ...   (blocking, same thread)
//! ```
//!
//! Every argv starts with `git` and runs in the repository root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::GitConfig;
use crate::core::executor::{CommandExecutor, ExecOutput};
use crate::core::runner::{
    AsyncRunner, CommandKind, CommandRequest, CommandResult, RunnerMessage,
};
use crate::git::branch::{BranchInfo, parse_branches, parse_remotes};
use crate::git::repo::RepositoryState;
use crate::git::status::{StatusLists, parse_status};

/// Program every command runs.
pub const GIT: &str = "git";

const STATUS_ARGS: [&str; 2] = ["status", "--porcelain=v1"];
const BRANCH_ARGS: [&str; 3] = ["branch", "-a", "--no-color"];
const REMOTE_ARGS: [&str; 1] = ["remote"];

/// A dequeued result, parsed for the front-end.
#[derive(Debug)]
pub enum GitEvent {
    Status(StatusLists),
    Branches(BranchInfo),
    Remotes(Vec<String>),
    /// Any command without a dedicated parser.
    Finished(CommandResult),
    /// The runner has stopped; no more events follow.
    Shutdown,
}

/// Builds `git <args...>`.
fn git_argv<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    std::iter::once(GIT.to_string())
        .chain(args.into_iter().map(|arg| arg.as_ref().to_string()))
        .collect()
}

/// What [`GitFacade::stage_all`] staged and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageAll {
    /// Paths handed to `add --`, in status order, without duplicates.
    pub paths: Vec<String>,
    /// Unstaged entries hidden by exclusion patterns.
    pub skipped: usize,
    /// The runner took the request. Always `false` when `paths` is empty.
    pub accepted: bool,
}

impl StageAll {
    /// Unstaged paths of `lists` that `config` does not exclude.
    #[must_use]
    pub fn plan(lists: &StatusLists, config: &GitConfig) -> Self {
        let visible = config.filter_excluded(&lists.unstaged);
        let skipped = lists.unstaged.len() - visible.len();
        let mut seen = BTreeSet::new();
        let paths = visible
            .into_iter()
            .filter(|entry| seen.insert(entry.path.clone()))
            .map(|entry| entry.path)
            .collect();
        Self {
            paths,
            skipped,
            accepted: false,
        }
    }
}

pub struct GitFacade {
    repo: RepositoryState,
    executor: CommandExecutor,
    runner: AsyncRunner,
    config: GitConfig,
}

impl GitFacade {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: &GitConfig) -> Self {
        let root = root.into();
        let executor = CommandExecutor::new(config.timeout());
        Self {
            runner: AsyncRunner::new(executor, root.clone()),
            repo: RepositoryState::new(root),
            executor,
            config: config.clone(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.repo.root()
    }

    pub fn is_git_repo(&mut self) -> bool {
        self.repo.is_valid()
    }

    /// Moves to another repository; caches are dropped. Returns its validity.
    pub fn switch_repository(&mut self, root: impl Into<PathBuf>) -> bool {
        let root = root.into();
        self.runner.set_cwd(root.clone());
        self.repo.switch_repository(root)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.runner.is_busy()
    }

    /// Submits an arbitrary request. `false` means busy or shut down.
    pub fn submit(&self, request: CommandRequest) -> bool {
        debug!(argv = ?request.argv(), label = %request.label(), "submitting");
        self.runner.submit(request)
    }

    fn submit_git<I, S>(&self, args: I, label: &str, kind: CommandKind) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.submit(CommandRequest::new(git_argv(args), label).with_kind(kind))
    }

    fn submit_action<I, S>(&self, args: I, label: &str) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.submit_git(args, label, CommandKind::Action)
    }

    pub fn request_status(&self) -> bool {
        self.submit_git(STATUS_ARGS, "status", CommandKind::Status)
    }

    pub fn request_branches(&self) -> bool {
        self.submit_git(BRANCH_ARGS, "branches", CommandKind::Branches)
    }

    pub fn request_remotes(&self) -> bool {
        self.submit_git(REMOTE_ARGS, "remotes", CommandKind::Remotes)
    }

    pub fn stage<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        self.submit_action(with_paths(&["add", "--"], paths), "stage")
    }

    /// Stages every unstaged change that no exclusion pattern hides.
    ///
    /// Reads the status on this thread, then submits a single `add --` with
    /// the visible paths. Nothing is submitted when no path is left.
    pub fn stage_all(&mut self) -> StageAll {
        let lists = self.get_status();
        let mut plan = StageAll::plan(&lists, &self.config);
        if plan.skipped > 0 {
            debug!(skipped = plan.skipped, "excluded paths left unstaged");
        }
        if !plan.paths.is_empty() {
            plan.accepted = self.stage(&plan.paths);
        }
        plan
    }

    /// `reset HEAD` also works before the first commit.
    pub fn unstage<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        self.submit_action(with_paths(&["reset", "-q", "HEAD", "--"], paths), "unstage")
    }

    /// Reverts working-tree changes of `paths` to the index.
    pub fn discard<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        self.submit_action(with_paths(&["checkout", "--"], paths), "discard")
    }

    pub fn commit(&self, message: &str) -> bool {
        self.submit_action(["commit", "-m", message], "commit")
    }

    pub fn amend_commit(&self, message: &str) -> bool {
        self.submit_action(["commit", "--amend", "-m", message], "amend")
    }

    pub fn push(&self, remote: Option<&str>, branch: Option<&str>, set_upstream: bool) -> bool {
        let mut args = vec!["push"];
        if set_upstream {
            args.push("-u");
        }
        args.extend(remote);
        args.extend(branch);
        self.submit_action(args, "push")
    }

    pub fn pull(&self, remote: Option<&str>, branch: Option<&str>) -> bool {
        let mut args = vec!["pull"];
        args.extend(remote);
        args.extend(branch);
        self.submit_action(args, "pull")
    }

    pub fn fetch(&self, remote: Option<&str>) -> bool {
        let mut args = vec!["fetch"];
        args.extend(remote);
        self.submit_action(args, "fetch")
    }

    pub fn checkout(&self, branch: &str) -> bool {
        self.submit_action(["checkout", branch], "checkout")
    }

    pub fn create_branch(&self, name: &str, checkout: bool) -> bool {
        if checkout {
            self.submit_action(["checkout", "-b", name], "create branch")
        } else {
            self.submit_action(["branch", name], "create branch")
        }
    }

    pub fn delete_branch(&self, name: &str, force: bool) -> bool {
        let flag = if force { "-D" } else { "-d" };
        self.submit_action(["branch", flag, name], "delete branch")
    }

    /// Deletes `branch` on `remote`. Protection checks are the caller's job.
    pub fn delete_remote_branch(&self, remote: &str, branch: &str) -> bool {
        self.submit_action(["push", remote, "--delete", branch], "delete remote branch")
    }

    pub fn add_remote(&self, name: &str, url: &str) -> bool {
        self.submit_action(["remote", "add", name, url], "add remote")
    }

    pub fn remove_remote(&self, name: &str) -> bool {
        self.submit_action(["remote", "remove", name], "remove remote")
    }

    /// Dequeues one result, runs its callback, and parses it by kind.
    ///
    /// Returns `None` if nothing arrived within `timeout`.
    pub fn next_event(&mut self, timeout: Duration) -> Option<GitEvent> {
        match self.runner.recv_timeout(timeout)? {
            RunnerMessage::Shutdown => Some(GitEvent::Shutdown),
            RunnerMessage::Completed(mut result) => {
                result.run_callback();
                Some(self.parse_result(result))
            }
        }
    }

    fn parse_result(&mut self, result: CommandResult) -> GitEvent {
        if !result.success {
            warn!(
                label = %result.label,
                exit_code = result.exit_code,
                stderr = %result.stderr.trim(),
                "command failed"
            );
        }
        match result.kind {
            CommandKind::Status => GitEvent::Status(self.status_from(&result.stdout, result.success)),
            CommandKind::Branches => GitEvent::Branches(branches_from(&result.stdout, result.success)),
            CommandKind::Remotes => GitEvent::Remotes(remotes_from(&result.stdout, result.success)),
            CommandKind::Action => GitEvent::Finished(result),
        }
    }

    fn status_from(&mut self, stdout: &str, success: bool) -> StatusLists {
        if success {
            parse_status(stdout, self.repo.paths_mut())
        } else {
            StatusLists::default()
        }
    }

    /// Runs `git <args>` on this thread.
    pub fn run_sync<I, S>(&self, args: I) -> ExecOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.executor.run_default(&git_argv(args), self.repo.root())
    }

    pub fn get_status(&mut self) -> StatusLists {
        let output = self.run_sync(STATUS_ARGS);
        self.status_from(&output.stdout, output.success())
    }

    #[must_use]
    pub fn get_branches(&self) -> BranchInfo {
        let output = self.run_sync(BRANCH_ARGS);
        branches_from(&output.stdout, output.success())
    }

    #[must_use]
    pub fn get_remotes(&self) -> Vec<String> {
        let output = self.run_sync(REMOTE_ARGS);
        remotes_from(&output.stdout, output.success())
    }

    /// Non-zero exit from `diff --cached --quiet` counts as changes.
    #[must_use]
    pub fn has_staged_changes(&self) -> bool {
        !self.run_sync(["diff", "--cached", "--quiet"]).success()
    }

    #[must_use]
    pub fn has_uncommitted_changes(&self) -> bool {
        !self.run_sync(["diff", "--quiet"]).success() || self.has_staged_changes()
    }

    /// Stops the runner; a `GitEvent::Shutdown` follows any pending result.
    pub fn shutdown(&self) {
        self.runner.shutdown();
    }
}

fn with_paths<'a, S: AsRef<str>>(prefix: &[&'a str], paths: &'a [S]) -> Vec<&'a str> {
    prefix
        .iter()
        .copied()
        .chain(paths.iter().map(AsRef::as_ref))
        .collect()
}

fn branches_from(stdout: &str, success: bool) -> BranchInfo {
    if success {
        parse_branches(stdout)
    } else {
        BranchInfo::default()
    }
}

fn remotes_from(stdout: &str, success: bool) -> Vec<String> {
    if success {
        parse_remotes(stdout)
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests;
