// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{GitEvent, GitFacade, StageAll};
use crate::config::GitConfig;
use crate::core::runner::CommandRequest;
use crate::git::status::{StatusEntry, StatusLists};

const WAIT: Duration = Duration::from_secs(20);

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("run git");
    assert!(status.success(), "git {args:?} failed");
}

fn init_repo() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("temp dir");
    git(temp.path(), &["init", "-q", "-b", "main"]);
    git(temp.path(), &["config", "user.name", "Test"]);
    git(temp.path(), &["config", "user.email", "test@example.com"]);
    git(temp.path(), &["config", "commit.gpgsign", "false"]);
    temp
}

fn facade(dir: &Path) -> GitFacade {
    GitFacade::new(dir, &GitConfig::default())
}

fn excluding(dir: &Path, patterns: &[&str]) -> GitFacade {
    let config = GitConfig {
        exclude_patterns: patterns.iter().map(ToString::to_string).collect(),
        ..GitConfig::default()
    };
    GitFacade::new(dir, &config)
}

fn next(facade: &mut GitFacade) -> GitEvent {
    facade.next_event(WAIT).expect("event before timeout")
}

#[test]
fn test_untracked_file_status() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");

    let mut facade = facade(temp.path());
    assert!(facade.is_git_repo());
    let status = facade.get_status();
    assert_eq!(status.unstaged, vec![StatusEntry::new("??", "a.txt")]);
    assert!(status.staged.is_empty());
}

#[test]
fn test_async_status_event() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");

    let mut facade = facade(temp.path());
    assert!(facade.request_status());
    match next(&mut facade) {
        GitEvent::Status(lists) => {
            assert_eq!(lists.unstaged, vec![StatusEntry::new("??", "a.txt")]);
        }
        other => panic!("expected status, got {other:?}"),
    }
}

#[test]
fn test_stage_commit_cycle() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");
    let mut facade = facade(temp.path());

    assert!(facade.stage(&["a.txt"]));
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));
    assert!(facade.has_staged_changes());
    assert!(facade.has_uncommitted_changes());

    assert!(facade.commit("first"));
    match next(&mut facade) {
        GitEvent::Finished(result) => assert!(result.success, "{}", result.stderr),
        other => panic!("expected finished, got {other:?}"),
    }
    assert!(!facade.has_staged_changes());
    assert!(!facade.has_uncommitted_changes());
    assert!(facade.get_status().is_clean());

    fs::write(temp.path().join("a.txt"), "changed").expect("write");
    assert!(facade.has_uncommitted_changes());
    assert!(!facade.has_staged_changes());
}

#[test]
fn test_stage_all_leaves_excluded_paths_unstaged() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");
    fs::write(temp.path().join("debug.log"), "log").expect("write");
    let mut facade = excluding(temp.path(), &["*.log"]);

    let outcome = facade.stage_all();
    assert_eq!(outcome.paths, ["a.txt"]);
    assert_eq!(outcome.skipped, 1);
    assert!(outcome.accepted);
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));

    let status = facade.get_status();
    assert_eq!(status.staged, [StatusEntry::new("A ", "a.txt")]);
    assert_eq!(status.unstaged, [StatusEntry::new("??", "debug.log")]);
}

#[test]
fn test_stage_all_with_only_excluded_changes_submits_nothing() {
    let temp = init_repo();
    fs::write(temp.path().join("debug.log"), "log").expect("write");
    let mut facade = excluding(temp.path(), &["*.log"]);

    let outcome = facade.stage_all();
    assert_eq!(
        outcome,
        StageAll {
            paths: Vec::new(),
            skipped: 1,
            accepted: false,
        }
    );
    assert!(facade.next_event(Duration::from_millis(200)).is_none());
    assert!(facade.get_status().staged.is_empty());
}

#[test]
fn test_stage_all_plan_drops_duplicates() {
    let lists = StatusLists {
        unstaged: vec![
            StatusEntry::new(" M", "a.txt"),
            StatusEntry::new(" D", "a.txt"),
            StatusEntry::new("??", "build/"),
            StatusEntry::new("??", "b.txt"),
        ],
        staged: vec![StatusEntry::new("M ", "c.txt")],
    };
    let config = GitConfig {
        exclude_patterns: vec!["build/".to_string()],
        ..GitConfig::default()
    };
    let plan = StageAll::plan(&lists, &config);
    assert_eq!(plan.paths, ["a.txt", "b.txt"]);
    assert_eq!(plan.skipped, 1);
    assert!(!plan.accepted);
}

#[test]
fn test_unstage_before_first_commit() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");
    git(temp.path(), &["add", "a.txt"]);
    let mut facade = facade(temp.path());

    assert!(facade.unstage(&["a.txt"]));
    match next(&mut facade) {
        GitEvent::Finished(result) => assert!(result.success, "{}", result.stderr),
        other => panic!("expected finished, got {other:?}"),
    }
    let status = facade.get_status();
    assert!(status.staged.is_empty());
    assert_eq!(status.unstaged, [StatusEntry::new("??", "a.txt")]);
}

#[test]
fn test_unstage_keeps_worktree_change() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");
    git(temp.path(), &["add", "a.txt"]);
    git(temp.path(), &["commit", "-q", "-m", "init"]);
    fs::write(temp.path().join("a.txt"), "changed").expect("write");
    git(temp.path(), &["add", "a.txt"]);
    let mut facade = facade(temp.path());

    assert!(facade.unstage(&["a.txt"]));
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));
    let status = facade.get_status();
    assert!(status.staged.is_empty());
    assert_eq!(status.unstaged, [StatusEntry::new(" M", "a.txt")]);
}

#[test]
fn test_branch_operations() {
    let temp = init_repo();
    fs::write(temp.path().join("a.txt"), "a").expect("write");
    git(temp.path(), &["add", "a.txt"]);
    git(temp.path(), &["commit", "-q", "-m", "init"]);
    let mut facade = facade(temp.path());

    assert!(facade.create_branch("feature", false));
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));

    assert!(facade.request_branches());
    match next(&mut facade) {
        GitEvent::Branches(info) => {
            assert_eq!(info.known_current(), Some("main"));
            assert_eq!(info.local, ["feature", "main"]);
            assert!(info.remote.is_empty());
        }
        other => panic!("expected branches, got {other:?}"),
    }

    assert!(facade.delete_branch("feature", false));
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));
    assert_eq!(facade.get_branches().local, ["main"]);
}

#[test]
fn test_remote_add_and_list() {
    let temp = init_repo();
    let mut facade = facade(temp.path());

    assert!(facade.add_remote("origin", "https://example.com/repo.git"));
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));

    assert!(facade.request_remotes());
    assert!(matches!(next(&mut facade), GitEvent::Remotes(r) if r == ["origin"]));

    assert!(facade.remove_remote("origin"));
    assert!(matches!(next(&mut facade), GitEvent::Finished(r) if r.success));
    assert!(facade.get_remotes().is_empty());
}

#[test]
fn test_callback_runs_in_next_event() {
    let temp = init_repo();
    let mut facade = facade(temp.path());
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);

    let request = CommandRequest::new(["git", "--version"], "version")
        .on_complete(move |_| flag.store(true, Ordering::SeqCst));
    assert!(facade.submit(request));
    assert!(!ran.load(Ordering::SeqCst));

    let _ = next(&mut facade);
    assert!(ran.load(Ordering::SeqCst));
}

#[test]
fn test_not_a_repository_degrades() {
    let temp = tempfile::tempdir().expect("temp dir");
    let mut facade = facade(temp.path());
    assert!(!facade.is_git_repo());
    assert!(facade.get_status().is_clean());
    assert_eq!(facade.get_branches().current, None);

    assert!(facade.request_status());
    assert!(matches!(next(&mut facade), GitEvent::Status(lists) if lists.is_clean()));
}

#[test]
fn test_switch_repository() {
    let repo = init_repo();
    let plain = tempfile::tempdir().expect("temp dir");
    fs::write(repo.path().join("a.txt"), "a").expect("write");

    let mut facade = facade(plain.path());
    assert!(!facade.is_git_repo());
    assert!(facade.switch_repository(repo.path()));
    assert_eq!(facade.root(), repo.path());

    assert!(facade.request_status());
    assert!(matches!(next(&mut facade), GitEvent::Status(lists) if lists.unstaged.len() == 1));
}

#[test]
fn test_shutdown_event() {
    let temp = init_repo();
    let mut facade = facade(temp.path());
    facade.shutdown();
    assert!(matches!(next(&mut facade), GitEvent::Shutdown));
    assert!(!facade.request_status());
}
