// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-flight command runner.
//!
//! ```text
//!   submit(request)                      consumer thread
//!        |                                     ^
//!   lock state: Idle -> Running                |
//!   (Running/Closed => false)          recv()/try_recv()
//!        |                                     |
//!        v                                     |
//!   std::thread "gitdeck-worker"               |
//!     CommandExecutor::run (catch_unwind)      |
//!     state -> Idle                            |
//!     tx.send(Completed(result)) --- flume ----+
//!
//!   shutdown(): state -> Closed, join worker, send(Shutdown)
//! ```
//!
//! At most one request is in flight; a submission while busy is rejected, not
//! queued. Callbacks travel with the result and run on the consumer's thread.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use tracing::{debug, error, warn};

use crate::core::executor::{CommandExecutor, ExecOutput};

/// Continuation invoked with the finished result on the consumer's thread.
pub type Callback = Box<dyn FnOnce(&CommandResult) + Send + 'static>;

/// Lifecycle of the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Closed,
}

/// What a request is for, so the consumer knows how to parse its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandKind {
    Status,
    Branches,
    Remotes,
    #[default]
    Action,
}

/// A command waiting to be executed. Immutable once submitted.
pub struct CommandRequest {
    argv: Vec<String>,
    label: String,
    kind: CommandKind,
    callback: Option<Callback>,
}

impl CommandRequest {
    pub fn new<I, S>(argv: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            label: label.into(),
            kind: CommandKind::Action,
            callback: None,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: CommandKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attaches a continuation run by the consumer once the result is dequeued.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnOnce(&CommandResult) + Send + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }
}

impl fmt::Debug for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRequest")
            .field("argv", &self.argv)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Outcome of one request, delivered through the result channel.
pub struct CommandResult {
    pub label: String,
    pub kind: CommandKind,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    callback: Option<Callback>,
}

impl CommandResult {
    pub(crate) fn new(
        label: String,
        kind: CommandKind,
        output: ExecOutput,
        callback: Option<Callback>,
    ) -> Self {
        Self {
            label,
            kind,
            success: output.success(),
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.exit_code,
            callback,
        }
    }

    #[must_use]
    pub const fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Runs the attached continuation, at most once.
    pub fn run_callback(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(self);
        }
    }
}

impl fmt::Debug for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandResult")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("success", &self.success)
            .field("stdout", &self.stdout)
            .field("stderr", &self.stderr)
            .field("exit_code", &self.exit_code)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Message on the result channel.
#[derive(Debug)]
pub enum RunnerMessage {
    Completed(CommandResult),
    /// No more results will be produced.
    Shutdown,
}

/// Single-slot executor with a result channel.
pub struct AsyncRunner {
    executor: CommandExecutor,
    cwd: PathBuf,
    state: Arc<Mutex<RunnerState>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    tx: Sender<RunnerMessage>,
    rx: Receiver<RunnerMessage>,
}

impl AsyncRunner {
    #[must_use]
    pub fn new(executor: CommandExecutor, cwd: impl Into<PathBuf>) -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            executor,
            cwd: cwd.into(),
            state: Arc::new(Mutex::new(RunnerState::Idle)),
            worker: Mutex::new(None),
            tx,
            rx,
        }
    }

    /// Changes the working directory for subsequent submissions.
    pub fn set_cwd(&mut self, cwd: impl Into<PathBuf>) {
        self.cwd = cwd.into();
    }

    #[must_use]
    pub fn state(&self) -> RunnerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state() == RunnerState::Running
    }

    /// Starts `request` on a worker thread.
    ///
    /// Returns `false` without side effects if a command is already running or
    /// the runner has been shut down.
    pub fn submit(&self, request: CommandRequest) -> bool {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state != RunnerState::Idle {
                warn!(label = %request.label, state = ?*state, "submission rejected");
                return false;
            }
            *state = RunnerState::Running;
        }

        // The previous worker already released the busy flag; joining it
        // guarantees its result is on the channel before the next one starts.
        let previous = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(previous) = previous {
            let _ = previous.join();
        }

        let executor = self.executor;
        let cwd = self.cwd.clone();
        let state = Arc::clone(&self.state);
        let tx = self.tx.clone();
        let label = request.label.clone();

        let spawned = std::thread::Builder::new()
            .name("gitdeck-worker".to_string())
            .spawn(move || run_worker(&executor, &cwd, request, &state, &tx));

        match spawned {
            Ok(handle) => {
                *self.worker.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
                debug!(label = %label, "submitted");
                true
            }
            Err(e) => {
                error!(label = %label, error = %e, "failed to spawn worker thread");
                *self.state.lock().unwrap_or_else(PoisonError::into_inner) = RunnerState::Idle;
                false
            }
        }
    }

    /// Blocks until the next message arrives.
    ///
    /// Returns `RunnerMessage::Shutdown` if the channel is gone.
    #[must_use]
    pub fn recv(&self) -> RunnerMessage {
        self.rx.recv().unwrap_or(RunnerMessage::Shutdown)
    }

    /// Waits up to `timeout` for the next message.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RunnerMessage> {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(RunnerMessage::Shutdown),
        }
    }

    /// Returns a message if one is ready.
    #[must_use]
    pub fn try_recv(&self) -> Option<RunnerMessage> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(RunnerMessage::Shutdown),
        }
    }

    /// Stops accepting work, waits for the in-flight command, then posts the
    /// shutdown sentinel as the final message.
    pub fn shutdown(&self) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == RunnerState::Closed {
                return;
            }
            // A running worker flips Running -> Idle; it must not reopen the runner
            *state = RunnerState::Closed;
        }

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }

        let _ = self.tx.send(RunnerMessage::Shutdown);
        debug!("runner shut down");
    }
}

impl Drop for AsyncRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Worker body: execute, release the busy flag, then post the result.
fn run_worker(
    executor: &CommandExecutor,
    cwd: &std::path::Path,
    request: CommandRequest,
    state: &Mutex<RunnerState>,
    tx: &Sender<RunnerMessage>,
) {
    let CommandRequest {
        argv,
        label,
        kind,
        callback,
    } = request;

    let output = panic::catch_unwind(AssertUnwindSafe(|| executor.run_default(&argv, cwd)))
        .unwrap_or_else(|_| {
            error!(label = %label, "worker panicked");
            ExecOutput::failure(format!("internal error while running '{label}'"))
        });

    {
        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == RunnerState::Running {
            *state = RunnerState::Idle;
        }
    }

    let result = CommandResult::new(label, kind, output, callback);
    if tx.send(RunnerMessage::Completed(result)).is_err() {
        warn!("result channel closed before delivery");
    }
}

#[cfg(test)]
mod tests;
