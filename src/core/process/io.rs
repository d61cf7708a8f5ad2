// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O capture for child processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (read to EOF, raw bytes)
//!   wait, racing the timeout
//!     timeout --> kill, reap, abort readers --> ProcessError::Timeout
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! Streams are read as bytes and decoded lossily once complete, so a stray
//! non-UTF-8 byte never truncates the output.

use crate::error::{ProcessError, Result};
use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

/// Spawns a task that drains `reader` so the child never blocks on a full pipe.
fn spawn_reader<R>(
    reader: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let name = process_name.to_string();
    reader.map(|reader| {
        tokio::spawn(async move { read_stream(reader, flags, &name, stream_name).await })
    })
}

/// Waits for a reader task, returning its text (empty on failure).
async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process, collecting output and enforcing the timeout.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
    ) -> Result<ProcessOutput> {
        let stdout_handle = spawn_reader(child.stdout.take(), self.stdout_flags(), name, "stdout");
        let stderr_handle = spawn_reader(child.stderr.take(), self.stderr_flags(), name, "stderr");

        let exit_status = if let Some(timeout_duration) = self.timeout_duration() {
            tokio::select! {
                status = child.wait() => status?,
                () = tokio::time::sleep(timeout_duration) => {
                    warn!(process = %name, timeout = ?timeout_duration, "process timed out");
                    child.kill().await.with_context(|| format!("failed to kill process {name}"))?;
                    // Grandchildren may still hold the pipes open
                    for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
                        handle.abort();
                    }
                    return Err(ProcessError::Timeout {
                        command: cmd_line.to_string(),
                        timeout_secs: timeout_duration.as_secs(),
                    }
                    .into());
                }
            }
        } else {
            child.wait().await?
        };

        let stdout = join_reader(stdout_handle).await;
        let stderr = join_reader(stderr_handle).await;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            stdout,
            stderr,
        ))
    }
}

/// Reads a stream to EOF, logging each line and keeping the text if asked.
async fn read_stream<R>(
    mut reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    if let Err(e) = reader.read_to_end(&mut bytes).await {
        warn!(
            process = %process_name,
            stream = %stream_name,
            error = %e,
            "error reading stream"
        );
    }

    let text = String::from_utf8_lossy(&bytes).into_owned();

    if flags.contains(StreamFlags::FORWARD_TO_LOG) {
        for line in text.lines() {
            trace!(process = %process_name, stream = %stream_name, line = %line, "output");
        }
    }

    if flags.contains(StreamFlags::KEEP_IN_STRING) {
        text
    } else {
        String::new()
    }
}
