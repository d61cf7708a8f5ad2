// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          status / branches / actions
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              | TOML + env, advisory opts |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |      git::GitFacade       |
//!              '--+----------+----------+--'
//!                 |          |          |
//!                 v          v          v
//!              parsers     repo      runner
//!           status/branch  state   single-flight
//!              /path      caches      |
//!                                     v
//!   +-----------------------------------------+
//!   |  core   executor, process (tokio)       |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
