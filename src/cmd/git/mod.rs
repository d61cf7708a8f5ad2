// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command handlers.
//!
//! ```text
//! open_repository(root) --> GitFacade (validity checked)
//!   handler: facade.request_*/action --> await_event (pump next_event)
//!            --> exclusions + display limit --> render text | JSON
//! close(facade): shutdown --> drain until GitEvent::Shutdown
//!
//! guards run before anything is submitted:
//!   checkout        already current => notice; dirty tree needs --force
//!   branch create   name validated
//!   branch delete   current branch refused
//!   delete-remote   protected branch needs --yes
//!   commit          nothing staged => error
//! ```
//!
//! Handlers use the facade the way a GUI would: submit, then pump events on
//! the calling thread.

pub mod render;


use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::git::{
    BranchArgs, BranchSubcommand, CheckoutArgs, CommitArgs, FetchArgs, PathsArgs, PullArgs,
    PushArgs, RemoteArgs, RemoteSubcommand, StageArgs, StatusArgs,
};
use crate::config::Config;
use crate::core::runner::CommandResult;
use crate::error::{GitDeskError, GitError, Result};
use crate::git::branch::validate_branch_name;
use crate::git::{BranchInfo, GitEvent, GitFacade, StatusLists};

use render::{ActionReport, CheckReport, StatusView};

/// How often the handler wakes up while waiting for a result.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Slack on top of the command timeout before giving up on a result.
const DELIVERY_GRACE: Duration = Duration::from_secs(5);

fn git_error(err: GitError) -> anyhow::Error {
    GitDeskError::from(err).into()
}

/// Opens `root`, failing if it is not a repository.
///
/// # Errors
///
/// Returns `GitError::InvalidRepository` if `root` has no `.git` entry.
pub fn open_repository(root: &Path, config: &Config) -> Result<GitFacade> {
    let mut facade = GitFacade::new(root, &config.git);
    if !facade.is_git_repo() {
        return Err(git_error(GitError::InvalidRepository {
            path: root.display().to_string(),
        }));
    }
    debug!(root = %root.display(), "opened repository");
    Ok(facade)
}

/// Stops the runner and drains the channel through the shutdown sentinel.
pub fn close(mut facade: GitFacade) {
    facade.shutdown();
    while let Some(event) = facade.next_event(POLL_INTERVAL) {
        if matches!(event, GitEvent::Shutdown) {
            break;
        }
        warn!(?event, "discarding event after shutdown");
    }
}

/// Pumps `next_event` until one arrives.
fn await_event(facade: &mut GitFacade, config: &Config) -> Result<GitEvent> {
    let deadline = Instant::now() + config.git.timeout() + DELIVERY_GRACE;
    loop {
        if let Some(event) = facade.next_event(POLL_INTERVAL) {
            return Ok(event);
        }
        if Instant::now() >= deadline {
            bail!("no result from git within {} seconds", config.git.timeout_secs);
        }
    }
}

fn ensure_submitted(accepted: bool) -> Result<()> {
    if accepted {
        Ok(())
    } else {
        Err(git_error(GitError::RunnerBusy))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

/// Prints the outcome of a command that had nothing to do.
fn report_notice(message: &str, json: bool) -> Result<()> {
    info!(notice = %message, "nothing to do");
    if json {
        print_json(&serde_json::json!({ "message": message }))
    } else {
        println!("{message}");
        Ok(())
    }
}

fn print_lines(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}

fn fetch_status(facade: &mut GitFacade, config: &Config) -> Result<StatusLists> {
    ensure_submitted(facade.request_status())?;
    match await_event(facade, config)? {
        GitEvent::Status(lists) => Ok(lists),
        other => bail!("expected a status result, got {other:?}"),
    }
}

fn fetch_branches(facade: &mut GitFacade, config: &Config) -> Result<BranchInfo> {
    ensure_submitted(facade.request_branches())?;
    match await_event(facade, config)? {
        GitEvent::Branches(info) => Ok(info),
        other => bail!("expected a branch listing, got {other:?}"),
    }
}

fn fetch_remotes(facade: &mut GitFacade, config: &Config) -> Result<Vec<String>> {
    ensure_submitted(facade.request_remotes())?;
    match await_event(facade, config)? {
        GitEvent::Remotes(remotes) => Ok(remotes),
        other => bail!("expected a remote listing, got {other:?}"),
    }
}

/// Shows staged and unstaged changes.
///
/// # Errors
///
/// Returns an error if the runner is busy or output cannot be written.
pub fn run_status_command(
    args: &StatusArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let lists = fetch_status(facade, config)?;
    let view = if args.all {
        StatusView::unfiltered(lists)
    } else {
        StatusView::new(lists, config)
    };
    if json {
        print_json(&view)
    } else {
        print_lines(&render::render_status(&view));
        Ok(())
    }
}

/// # Errors
///
/// Returns an error if the runner is busy or output cannot be written.
pub fn run_branches_command(facade: &mut GitFacade, config: &Config, json: bool) -> Result<()> {
    let info = fetch_branches(facade, config)?;
    if json {
        print_json(&info)
    } else {
        print_lines(&render::render_branches(&info));
        Ok(())
    }
}

/// # Errors
///
/// Returns an error if the runner is busy or output cannot be written.
pub fn run_remotes_command(facade: &mut GitFacade, config: &Config, json: bool) -> Result<()> {
    let remotes = fetch_remotes(facade, config)?;
    if json {
        print_json(&remotes)
    } else {
        print_lines(&remotes.join("\n"));
        Ok(())
    }
}

/// Reports validity and pending changes using the blocking helpers.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn run_check_command(root: &Path, config: &Config, json: bool) -> Result<()> {
    let mut facade = GitFacade::new(root, &config.git);
    let report = CheckReport::collect(&mut facade);
    close(facade);
    if json {
        print_json(&report)
    } else {
        print_lines(&render::render_check(&report));
        Ok(())
    }
}

/// Pumps events until an action's result arrives.
fn await_finished(facade: &mut GitFacade, config: &Config) -> Result<CommandResult> {
    match await_event(facade, config)? {
        GitEvent::Finished(result) => Ok(result),
        other => bail!("expected a command result, got {other:?}"),
    }
}

fn command_outcome(result: &CommandResult) -> Result<()> {
    if result.success {
        info!(label = %result.label, "command succeeded");
        Ok(())
    } else {
        Err(git_error(GitError::CommandFailed {
            command: result.label.clone(),
            message: render::failure_message(result),
        }))
    }
}

/// Waits for an action's result and reports it.
fn finish_action(
    facade: &mut GitFacade,
    config: &Config,
    accepted: bool,
    json: bool,
) -> Result<()> {
    ensure_submitted(accepted)?;
    let result = await_finished(facade, config)?;
    report_action(&result, json)?;
    command_outcome(&result)
}

fn report_action(result: &CommandResult, json: bool) -> Result<()> {
    if json {
        return print_json(&ActionReport::from(result));
    }
    print_lines(result.stdout.trim_end());
    if !result.success {
        return Ok(());
    }
    // git reports progress (push, checkout) on stderr
    let stderr = result.stderr.trim_end();
    if !stderr.is_empty() {
        eprintln!("{stderr}");
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails.
pub fn run_stage_command(
    args: &StageArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    if !args.all {
        let accepted = facade.stage(&args.paths);
        return finish_action(facade, config, accepted, json);
    }

    let outcome = facade.stage_all();
    let skipped = match outcome.skipped {
        0 => String::new(),
        n => format!(" ({n} excluded by patterns)"),
    };
    if outcome.paths.is_empty() {
        return report_notice(&format!("nothing to stage{skipped}"), json);
    }
    finish_action(facade, config, outcome.accepted, json)?;
    if !json && !skipped.is_empty() {
        eprintln!("staged {} path(s){skipped}", outcome.paths.len());
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails.
pub fn run_unstage_command(
    args: &PathsArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = facade.unstage(&args.paths);
    finish_action(facade, config, accepted, json)
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails.
pub fn run_discard_command(
    args: &PathsArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = facade.discard(&args.paths);
    finish_action(facade, config, accepted, json)
}

/// # Errors
///
/// Returns an error if nothing is staged, the runner is busy, or git fails.
pub fn run_commit_command(
    args: &CommitArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = if args.amend {
        facade.amend_commit(&args.message)
    } else {
        if !facade.has_staged_changes() {
            bail!("nothing staged to commit");
        }
        facade.commit(&args.message)
    };
    finish_action(facade, config, accepted, json)
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails. With
/// `--all-remotes`, every remote is tried and the failures are reported
/// together.
pub fn run_push_command(
    args: &PushArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    if args.all_remotes {
        return push_to_all_remotes(facade, config, json);
    }
    let accepted = facade.push(
        args.remote.as_deref(),
        args.branch.as_deref(),
        args.set_upstream,
    );
    finish_action(facade, config, accepted, json)
}

/// Pushes to each remote in turn, continuing past failures.
fn push_to_all_remotes(facade: &mut GitFacade, config: &Config, json: bool) -> Result<()> {
    let remotes = facade.get_remotes();
    if remotes.is_empty() {
        return Err(git_error(GitError::NoRemotes));
    }

    let mut reports = Vec::with_capacity(remotes.len());
    let mut failures = Vec::new();
    for remote in &remotes {
        if !json {
            eprintln!("pushing to {remote}...");
        }
        ensure_submitted(facade.push(Some(remote), None, false))?;
        let result = await_finished(facade, config)?;
        if json {
            reports.push(ActionReport::from(&result));
        } else {
            report_action(&result, false)?;
        }
        if !result.success {
            warn!(remote = %remote, exit_code = result.exit_code, "push failed");
            failures.push(format!("{remote}: {}", render::failure_message(&result)));
        }
    }
    if json {
        print_json(&reports)?;
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(git_error(GitError::CommandFailed {
            command: "push --all-remotes".to_string(),
            message: failures.join("; "),
        }))
    }
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails.
pub fn run_pull_command(
    args: &PullArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = facade.pull(args.remote.as_deref(), args.branch.as_deref());
    finish_action(facade, config, accepted, json)
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails.
pub fn run_fetch_command(
    args: &FetchArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = facade.fetch(args.remote.as_deref());
    finish_action(facade, config, accepted, json)
}

/// Switches branches. `origin/x` checks out a local `x`.
///
/// # Errors
///
/// Returns an error for uncommitted changes without `--force`, a busy
/// runner, or a git failure.
pub fn run_checkout_command(
    args: &CheckoutArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let info = facade.get_branches();
    let name = info.checkout_name(&args.branch);
    if info.known_current() == Some(name) {
        return report_notice(&format!("already on '{name}'"), json);
    }
    check_clean_worktree(name, facade.has_uncommitted_changes(), args.force)?;
    let accepted = facade.checkout(name);
    finish_action(facade, config, accepted, json)
}

/// Refuses to switch away from uncommitted work without confirmation.
pub(crate) fn check_clean_worktree(target: &str, dirty: bool, confirmed: bool) -> Result<()> {
    if !dirty {
        return Ok(());
    }
    if confirmed {
        warn!(branch = %target, "switching with uncommitted changes");
        return Ok(());
    }
    let message = format!("refusing to switch to {target} without --force");
    Err(git_error(GitError::UncommittedChanges)).context(message)
}

/// # Errors
///
/// Returns an error for an unconfirmed protected branch deletion, a busy
/// runner, or a git failure.
pub fn run_branch_command(
    args: &BranchArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = match &args.subcommand {
        BranchSubcommand::Create { name, checkout } => {
            validate_branch_name(name).map_err(git_error)?;
            facade.create_branch(name, *checkout)
        }
        BranchSubcommand::Delete { name, force } => {
            check_branch_deletion(&facade.get_branches(), name)?;
            facade.delete_branch(name, *force)
        }
        BranchSubcommand::DeleteRemote {
            remote,
            branch,
            yes,
        } => {
            check_remote_deletion(config, remote, branch, *yes)?;
            facade.delete_remote_branch(remote, branch)
        }
    };
    finish_action(facade, config, accepted, json)
}

/// Refuses to delete the checked-out branch.
pub(crate) fn check_branch_deletion(info: &BranchInfo, name: &str) -> Result<()> {
    if info.known_current() == Some(name) {
        return Err(git_error(GitError::CurrentBranch {
            branch: name.to_string(),
        }));
    }
    Ok(())
}

/// Refuses to delete a protected remote branch without confirmation.
pub(crate) fn check_remote_deletion(
    config: &Config,
    remote: &str,
    branch: &str,
    confirmed: bool,
) -> Result<()> {
    let full = format!("{remote}/{branch}");
    if !config.git.is_protected_branch(&full) {
        return Ok(());
    }
    if confirmed {
        warn!(branch = %full, "deleting protected branch");
        return Ok(());
    }
    let message = format!("refusing to delete {full} without --yes");
    Err(git_error(GitError::ProtectedBranch { branch: full })).context(message)
}

/// # Errors
///
/// Returns an error if the runner is busy or git fails.
pub fn run_remote_command(
    args: &RemoteArgs,
    facade: &mut GitFacade,
    config: &Config,
    json: bool,
) -> Result<()> {
    let accepted = match &args.subcommand {
        RemoteSubcommand::Add { name, url } => facade.add_remote(name, url),
        RemoteSubcommand::Remove { name } => facade.remove_remote(name),
    };
    finish_action(facade, config, accepted, json)
}
