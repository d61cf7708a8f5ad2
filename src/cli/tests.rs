// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use crate::cli::git::{BranchSubcommand, RemoteSubcommand};
use crate::cli::{Cli, Command};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gitdeck").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_defaults() {
    let cli = parse(&["status"]);
    assert_eq!(cli.global.repo, Path::new("."));
    assert!(!cli.global.json);
    assert!(matches!(cli.command, Some(Command::Status(ref args)) if !args.all));
}

#[test]
fn test_global_options_become_overrides() {
    let cli = parse(&[
        "-C",
        "/tmp/repo",
        "-l",
        "4",
        "--log-file",
        "gitdeck.log",
        "-s",
        "git.timeout_secs=5",
        "branches",
    ]);
    assert_eq!(cli.global.repo, Path::new("/tmp/repo"));
    insta::assert_debug_snapshot!(cli.global.to_config_overrides(), @r#"
    [
        "git.timeout_secs=5",
        "global.output_log_level=4",
        "global.file_log_level=4",
        "global.log_file=gitdeck.log",
    ]
    "#);
}

#[test]
fn test_json_flag_after_subcommand() {
    let cli = parse(&["remotes", "--json"]);
    assert!(cli.global.json);
    assert!(matches!(cli.command, Some(Command::Remotes)));
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["gitdeck", "-l", "7", "status"]).is_err());
}

#[test]
fn test_stage_requires_paths_or_all() {
    assert!(Cli::try_parse_from(["gitdeck", "stage"]).is_err());
    assert!(Cli::try_parse_from(["gitdeck", "stage", "-A", "a.txt"]).is_err());

    let cli = parse(&["stage", "a.txt", "b c.txt"]);
    match cli.command {
        Some(Command::Stage(args)) => {
            assert_eq!(args.paths, ["a.txt", "b c.txt"]);
            assert!(!args.all);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(matches!(parse(&["stage", "--all"]).command, Some(Command::Stage(args)) if args.all));
}

#[test]
fn test_commit_requires_message() {
    assert!(Cli::try_parse_from(["gitdeck", "commit"]).is_err());
    match parse(&["commit", "-m", "fix", "--amend"]).command {
        Some(Command::Commit(args)) => {
            assert_eq!(args.message, "fix");
            assert!(args.amend);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_push_positionals() {
    match parse(&["push", "origin", "main", "-u"]).command {
        Some(Command::Push(args)) => {
            assert_eq!(args.remote.as_deref(), Some("origin"));
            assert_eq!(args.branch.as_deref(), Some("main"));
            assert!(args.set_upstream);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(matches!(parse(&["push"]).command, Some(Command::Push(args)) if args.remote.is_none()));
}

#[test]
fn test_push_all_remotes_excludes_targets() {
    assert!(matches!(
        parse(&["push", "--all-remotes"]).command,
        Some(Command::Push(args)) if args.all_remotes && args.remote.is_none()
    ));
    assert!(Cli::try_parse_from(["gitdeck", "push", "origin", "--all-remotes"]).is_err());
    assert!(Cli::try_parse_from(["gitdeck", "push", "--all-remotes", "-u"]).is_err());
}

#[test]
fn test_checkout_force_flag() {
    assert!(matches!(
        parse(&["checkout", "origin/topic", "--force"]).command,
        Some(Command::Checkout(args)) if args.force && args.branch == "origin/topic"
    ));
    assert!(matches!(
        parse(&["checkout", "main"]).command,
        Some(Command::Checkout(args)) if !args.force
    ));
}

#[test]
fn test_branch_subcommands() {
    match parse(&["branch", "delete-remote", "origin", "main", "--yes"]).command {
        Some(Command::Branch(args)) => match args.subcommand {
            BranchSubcommand::DeleteRemote {
                remote,
                branch,
                yes,
            } => {
                assert_eq!((remote.as_str(), branch.as_str(), yes), ("origin", "main", true));
            }
            other => panic!("unexpected subcommand: {other:?}"),
        },
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(matches!(
        parse(&["branch", "create", "topic", "-c"]).command,
        Some(Command::Branch(args))
            if matches!(args.subcommand, BranchSubcommand::Create { checkout: true, .. })
    ));
}

#[test]
fn test_remote_subcommands() {
    assert!(matches!(
        parse(&["remote", "add", "origin", "https://example.com/r.git"]).command,
        Some(Command::Remote(args)) if matches!(args.subcommand, RemoteSubcommand::Add { .. })
    ));
    assert!(Cli::try_parse_from(["gitdeck", "remote", "add", "origin"]).is_err());
}
