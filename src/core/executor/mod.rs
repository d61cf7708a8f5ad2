// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Synchronous command execution that never fails.
//!
//! ```text
//! CommandExecutor::run(argv, cwd, timeout)
//!   cwd missing?        --> (-1, "working directory does not exist")
//!   argv empty?         --> (-1, "no command given")
//!   which(argv[0]) miss --> (-1, "executable not found")
//!   current-thread runtime
//!     ProcessBuilder (non-interactive env, ALLOW_FAILURE, timeout)
//!   timeout             --> (-1, "timed out after N seconds")
//!   --> ExecOutput { stdout, stderr, exit_code }
//! ```
//!
//! Each call spawns exactly one child and blocks the calling thread until it
//! exits or the timeout kills it.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ProcessError;

/// Default bound on a single command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment forced on every child so nothing waits for an editor or a prompt.
pub const NON_INTERACTIVE_ENV: [(&str, &str); 4] = [
    ("GIT_EDITOR", "true"),
    ("GIT_SEQUENCE_EDITOR", "true"),
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GCM_INTERACTIVE", "never"),
];

/// Exit code used for failures that never produced one.
pub const SYNTHETIC_EXIT_CODE: i32 = -1;

/// Raw outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecOutput {
    /// Failure tuple with no stdout and a descriptive stderr.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            exit_code: SYNTHETIC_EXIT_CODE,
        }
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<ProcessError> for ExecOutput {
    fn from(err: ProcessError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Stateless runner for a single subprocess.
#[derive(Debug, Clone, Copy)]
pub struct CommandExecutor {
    timeout: Duration,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl CommandExecutor {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The timeout used by [`Self::run_default`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs with the executor's configured timeout.
    #[must_use]
    pub fn run_default(&self, argv: &[String], cwd: &Path) -> ExecOutput {
        self.run(argv, cwd, self.timeout)
    }

    /// Runs `argv` in `cwd`, blocking until it exits or `timeout` elapses.
    ///
    /// Every failure mode is folded into the returned tuple.
    #[must_use]
    pub fn run(&self, argv: &[String], cwd: &Path, timeout: Duration) -> ExecOutput {
        if !cwd.is_dir() {
            return ProcessError::InvalidWorkingDir {
                path: cwd.display().to_string(),
            }
            .into();
        }

        let Some((program, args)) = argv.split_first() else {
            return ProcessError::EmptyCommand.into();
        };

        let builder = match ProcessBuilder::which(program) {
            Ok(builder) => builder,
            Err(e) => {
                warn!(program = %program, "executable not found");
                return e.into();
            }
        };

        let builder = NON_INTERACTIVE_ENV
            .iter()
            .fold(builder, |b, (key, value)| b.env(*key, *value))
            .name(program.as_str())
            .args(args)
            .cwd(cwd)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .timeout(timeout);

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => return ExecOutput::failure(format!("failed to start process runtime: {e}")),
        };

        match runtime.block_on(builder.run()) {
            Ok(output) => {
                let exit_code = output.exit_code();
                let (stdout, stderr) = output.into_streams();
                debug!(exit_code, "command finished");
                ExecOutput {
                    stdout,
                    stderr,
                    exit_code,
                }
            }
            Err(e) => describe_failure(program, &e),
        }
    }
}

/// Converts a process error into a failure tuple with a distinct message.
fn describe_failure(program: &str, err: &anyhow::Error) -> ExecOutput {
    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::SpawnFailed { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            ProcessError::ExecutableNotFound {
                name: program.to_string(),
            }
            .into()
        }
        Some(ProcessError::Timeout {
            command,
            timeout_secs,
        }) => ExecOutput::failure(format!(
            "command timed out after {timeout_secs} seconds: {command}"
        )),
        _ => ExecOutput::failure(format!("{err:#}")),
    }
}
