// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::{Duration, Instant};

use super::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ProcessError;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime should build")
        .block_on(future)
}

#[test]
fn test_git_version_captured() {
    let output = block_on(
        ProcessBuilder::new("git")
            .args(["--version"])
            .capture_output()
            .run(),
    )
    .expect("git --version should succeed");

    assert!(output.success());
    let (stdout, stderr) = output.into_streams();
    assert!(stdout.starts_with("git version"));
    assert!(stderr.is_empty());
}

#[test]
fn test_failure_is_error_without_allow_failure() {
    let result = block_on(
        ProcessBuilder::new("git")
            .args(["definitely-not-a-subcommand"])
            .capture_output()
            .run(),
    );
    assert!(result.is_err());
}

#[test]
fn test_allow_failure_keeps_exit_code() {
    let output = block_on(
        ProcessBuilder::new("git")
            .args(["definitely-not-a-subcommand"])
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .run(),
    )
    .expect("process should complete");

    assert_ne!(output.exit_code(), 0);
    assert!(!output.stderr().is_empty());
}

#[test]
fn test_env_override_reaches_child() {
    let output = block_on(
        ProcessBuilder::new("git")
            .args(["var", "GIT_EDITOR"])
            .env("GIT_EDITOR", "true")
            .capture_output()
            .run(),
    )
    .expect("git var should succeed");
    insta::assert_snapshot!(output.into_streams().0.trim(), @"true");
}

#[test]
fn test_spawn_failure_is_typed() {
    let err = block_on(
        ProcessBuilder::new("gitdeck-no-such-binary-xyz")
            .capture_output()
            .run(),
    )
    .expect_err("spawn should fail");

    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::SpawnFailed { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected SpawnFailed, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_timeout_kills_child() {
    let start = Instant::now();
    let err = block_on(
        ProcessBuilder::new("sleep")
            .args(["5"])
            .capture_output()
            .timeout(Duration::from_millis(200))
            .run(),
    )
    .expect_err("sleep should time out");

    assert!(start.elapsed() < Duration::from_secs(4));
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::Timeout { .. })
    ));
}

#[test]
fn test_executable_lookup() {
    let found = ProcessBuilder::find("git").expect("git should be in PATH");
    assert_eq!(ProcessBuilder::find("git"), Some(found), "lookup should be cached");
    assert!(ProcessBuilder::which("gitdeck-no-such-binary-xyz").is_err());
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("git").args(["commit", "-m", "two words"]);
    insta::assert_snapshot!(builder.command_line(), @r#"git commit -m "two words""#);
    assert_eq!(builder.display_name(), "git");
    assert_eq!(builder.name("custom").display_name(), "custom");
}
