// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.

use std::fs;

use gitdeck::config::{CONFIG_FILE_NAME, Config, ConfigLoader};
use gitdeck::logging::LogLevel;

#[test]
fn config_full_file() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"
[global]
output_log_level = 3
file_log_level = 5
log_file = "gitdeck.log"

[git]
timeout_secs = 45
exclude_patterns = ["*.orig", "build/**"]
protected_branches = ["main", "release"]

[display]
max_entries = 100
"#,
    )
    .expect("write config");

    let config = Config::from_file(&path).expect("config should load");
    assert_eq!(config.global.output_log_level, LogLevel::INFO);
    assert_eq!(config.git.timeout_secs, 45);
    assert!(config.git.is_excluded("src/main.rs.orig"));
    assert!(config.git.is_protected_branch("upstream/release"));
    insta::assert_json_snapshot!(config, @r#"
    {
      "global": {
        "output_log_level": 3,
        "file_log_level": 5,
        "log_file": "gitdeck.log"
      },
      "git": {
        "timeout_secs": 45,
        "exclude_patterns": [
          "*.orig",
          "build/**"
        ],
        "protected_branches": [
          "main",
          "release"
        ]
      },
      "display": {
        "max_entries": 100
      }
    }
    "#);
}

#[test]
fn config_empty_file_gives_defaults() {
    let config = Config::parse("").expect("empty config is valid");
    assert_eq!(config.git.timeout_secs, 30);
    assert_eq!(config.display.max_entries, 500);
}

#[test]
fn config_optional_repo_file_then_ini() {
    let repo = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(
        repo.path().join(CONFIG_FILE_NAME),
        "[git]\ntimeout_secs = 11\n[display]\nmax_entries = 7\n",
    )
    .expect("write repo config");
    let ini = repo.path().join("extra.toml");
    fs::write(&ini, "[git]\ntimeout_secs = 22\n").expect("write ini");

    let loader = ConfigLoader::new()
        .add_toml_file_optional(repo.path().join(CONFIG_FILE_NAME))
        .add_toml_file(&ini);
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().expect("config should load");
    assert_eq!(config.git.timeout_secs, 22);
    assert_eq!(config.display.max_entries, 7);
}

#[test]
fn config_invalid_log_level_rejected() {
    let err = Config::parse("[global]\noutput_log_level = 9").expect_err("level 9 is invalid");
    assert!(format!("{err:#}").contains("log level must be 0-6"), "{err:#}");
}
