// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Options | Inis | Check | Status | Branches | Remotes | Actions
//! ```

use std::process::ExitCode;

use gitdeck::cli::global::GlobalOptions;
use gitdeck::cli::{self, Command};
use gitdeck::cmd::config::{run_inis_command, run_options_command};
use gitdeck::cmd::git::{
    close, open_repository, run_branch_command, run_branches_command, run_check_command,
    run_checkout_command, run_commit_command, run_discard_command, run_fetch_command,
    run_pull_command, run_push_command, run_remote_command, run_remotes_command,
    run_stage_command, run_status_command, run_unstage_command,
};
use gitdeck::config::{CONFIG_FILE_NAME, Config, ConfigLoader, ENV_PREFIX};
use gitdeck::error::Result;
use gitdeck::git::GitFacade;
use gitdeck::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let command = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(command, &cli.global, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}

fn dispatch_command(command: &Command, global: &GlobalOptions, config: &Config) -> Result<()> {
    let json = global.json;
    match command {
        Command::Version => {
            handle_version_command();
            Ok(())
        }
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Inis => {
            run_inis_command(&build_config_loader(global).format_loaded_files());
            Ok(())
        }
        Command::Check => run_check_command(&global.repo, config, json),
        Command::Status(args) => with_repository(global, config, |facade| {
            run_status_command(args, facade, config, json)
        }),
        Command::Branches => with_repository(global, config, |facade| {
            run_branches_command(facade, config, json)
        }),
        Command::Remotes => with_repository(global, config, |facade| {
            run_remotes_command(facade, config, json)
        }),
        Command::Stage(args) => with_repository(global, config, |facade| {
            run_stage_command(args, facade, config, json)
        }),
        Command::Unstage(args) => with_repository(global, config, |facade| {
            run_unstage_command(args, facade, config, json)
        }),
        Command::Discard(args) => with_repository(global, config, |facade| {
            run_discard_command(args, facade, config, json)
        }),
        Command::Commit(args) => with_repository(global, config, |facade| {
            run_commit_command(args, facade, config, json)
        }),
        Command::Push(args) => with_repository(global, config, |facade| {
            run_push_command(args, facade, config, json)
        }),
        Command::Pull(args) => with_repository(global, config, |facade| {
            run_pull_command(args, facade, config, json)
        }),
        Command::Fetch(args) => with_repository(global, config, |facade| {
            run_fetch_command(args, facade, config, json)
        }),
        Command::Checkout(args) => with_repository(global, config, |facade| {
            run_checkout_command(args, facade, config, json)
        }),
        Command::Branch(args) => with_repository(global, config, |facade| {
            run_branch_command(args, facade, config, json)
        }),
        Command::Remote(args) => with_repository(global, config, |facade| {
            run_remote_command(args, facade, config, json)
        }),
    }
}

/// Opens the repository, runs `handler`, then shuts the runner down.
fn with_repository(
    global: &GlobalOptions,
    config: &Config,
    handler: impl FnOnce(&mut GitFacade) -> Result<()>,
) -> Result<()> {
    let mut facade = open_repository(&global.repo, config)?;
    let result = handler(&mut facade);
    close(facade);
    result
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(global.repo.join(CONFIG_FILE_NAME));
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = build_config_loader(global);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    loader.build()
}
