// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitDeskError, GitDeskResult, GitError, ProcessError};

#[test]
fn test_git_error_display() {
    let err = GitError::InvalidRepository {
        path: "/tmp/nowhere".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"not a git repository: /tmp/nowhere");
}

#[test]
fn test_process_timeout_display() {
    let err = ProcessError::Timeout {
        command: "git fetch".to_string(),
        timeout_secs: 30,
    };
    insta::assert_snapshot!(err.to_string(), @"process 'git fetch' timed out after 30 seconds");
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidPattern {
        pattern: "[".to_string(),
        message: "unclosed class".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"invalid exclusion pattern '[': unclosed class");
}

#[test]
fn test_boxed_conversion_wraps_variant() {
    let err: GitDeskError = GitError::ProtectedBranch {
        branch: "main".to_string(),
    }
    .into();
    assert!(matches!(err, GitDeskError::Git(_)));
    insta::assert_snapshot!(err.to_string(), @"git error: branch 'main' is protected");
}

#[test]
fn test_other_error_display() {
    let err = GitDeskError::other("plain message");
    assert_eq!(err.to_string(), "plain message");
}

#[test]
fn test_gitdesk_error_size() {
    // Box<str> variants are 16 bytes (fat pointer), plus discriminant.
    let size = std::mem::size_of::<GitDeskError>();
    assert!(size <= 24, "GitDeskError is {size} bytes, expected <= 24");
}

#[test]
fn test_gitdesk_result_size() {
    let size = std::mem::size_of::<GitDeskResult<()>>();
    assert!(size <= 24, "GitDeskResult<()> is {size} bytes, expected <= 24");
}

#[test]
fn test_branch_error_display() {
    let err = GitError::InvalidBranchName {
        name: "bad name".to_string(),
        reason: "contains ' '".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"invalid branch name 'bad name': contains ' '");

    let err = GitError::CurrentBranch {
        branch: "main".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"cannot delete the current branch 'main'");
}
