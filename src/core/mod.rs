// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command execution layers.
//!
//! ```text
//!              core
//!               |
//!     +---------+----------+
//!     v         v          v
//!   runner   executor   process
//!     |         |          |
//!  single-   blocking   tokio child,
//!  flight    never-fail  timeout+kill
//!  + flume   tuples
//! ```

pub mod executor;
pub mod process;
pub mod runner;
