// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_output() .timeout()
//!   .run()
//!       --> tokio::process::Command
//!           drain stdout/stderr, race the timeout
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
