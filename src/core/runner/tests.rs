// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{AsyncRunner, CommandKind, CommandRequest, RunnerMessage, RunnerState};
use crate::core::executor::CommandExecutor;

const WAIT: Duration = Duration::from_secs(20);

fn runner() -> (AsyncRunner, tempfile::TempDir) {
    let temp = tempfile::tempdir().expect("temp dir");
    let runner = AsyncRunner::new(CommandExecutor::default(), temp.path());
    (runner, temp)
}

fn expect_completed(runner: &AsyncRunner) -> super::CommandResult {
    match runner.recv_timeout(WAIT) {
        Some(RunnerMessage::Completed(result)) => result,
        other => panic!("expected a completed result, got {other:?}"),
    }
}

#[test]
fn test_submit_delivers_result() {
    let (runner, _temp) = runner();
    assert!(runner.submit(CommandRequest::new(["git", "--version"], "version")));

    let result = expect_completed(&runner);
    assert!(result.success);
    assert_eq!(result.label, "version");
    assert_eq!(result.kind, CommandKind::Action);
    assert!(result.stdout.starts_with("git version"));
    assert_eq!(runner.state(), RunnerState::Idle);
}

#[cfg(unix)]
#[test]
fn test_second_submission_rejected_while_running() {
    let (runner, _temp) = runner();
    assert!(runner.submit(CommandRequest::new(["sleep", "1"], "slow")));
    assert!(runner.is_busy());
    assert!(!runner.submit(CommandRequest::new(["git", "--version"], "rejected")));

    let result = expect_completed(&runner);
    assert_eq!(result.label, "slow");
    assert!(result.success);

    // Exactly once: nothing else is queued
    assert!(runner.try_recv().is_none());
    assert!(!runner.is_busy());
}

#[test]
fn test_failure_still_clears_busy_flag() {
    let (runner, _temp) = runner();
    assert!(runner.submit(CommandRequest::new(["gitdeck-no-such-git"], "missing")));

    let result = expect_completed(&runner);
    assert!(!result.success);
    assert_eq!(result.exit_code, -1);
    assert!(runner.submit(CommandRequest::new(["git", "--version"], "after")));
    assert_eq!(expect_completed(&runner).label, "after");
}

#[test]
fn test_results_arrive_in_acceptance_order() {
    let (runner, _temp) = runner();
    let mut labels = Vec::new();
    for label in ["one", "two", "three"] {
        assert!(runner.submit(CommandRequest::new(["git", "--version"], label)));
        labels.push(expect_completed(&runner).label);
    }
    insta::assert_debug_snapshot!(labels, @r#"
    [
        "one",
        "two",
        "three",
    ]
    "#);
}

#[test]
fn test_callback_runs_on_consumer_once() {
    let (runner, _temp) = runner();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let consumer = std::thread::current().id();

    let request = CommandRequest::new(["git", "--version"], "cb")
        .with_kind(CommandKind::Status)
        .on_complete(move |result| {
            assert_eq!(std::thread::current().id(), consumer);
            assert!(result.success);
            seen.fetch_add(1, Ordering::SeqCst);
        });
    assert!(runner.submit(request));

    let mut result = expect_completed(&runner);
    assert!(result.has_callback());
    result.run_callback();
    result.run_callback();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!result.has_callback());
    assert_eq!(result.kind, CommandKind::Status);
}

#[test]
fn test_shutdown_sentinel_is_last() {
    let (runner, _temp) = runner();
    assert!(runner.submit(CommandRequest::new(["git", "--version"], "pending")));
    runner.shutdown();

    assert!(matches!(
        runner.recv_timeout(WAIT),
        Some(RunnerMessage::Completed(_))
    ));
    assert!(matches!(runner.recv(), RunnerMessage::Shutdown));
    assert_eq!(runner.state(), RunnerState::Closed);
    assert!(!runner.submit(CommandRequest::new(["git", "--version"], "late")));
}

#[test]
fn test_shutdown_is_idempotent() {
    let (runner, _temp) = runner();
    runner.shutdown();
    runner.shutdown();
    assert!(matches!(runner.try_recv(), Some(RunnerMessage::Shutdown)));
    assert!(runner.try_recv().is_none());
}

#[test]
fn test_request_debug_hides_callback() {
    let request = CommandRequest::new(["git", "status"], "status").on_complete(|_| {});
    insta::assert_debug_snapshot!(request, @r#"
    CommandRequest {
        argv: [
            "git",
            "status",
        ],
        label: "status",
        kind: Action,
        callback: true,
    }
    "#);
}
