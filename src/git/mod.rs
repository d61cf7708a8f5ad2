// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git output parsing and the front-end facade.
//!
//! ```text
//!                 facade (GitFacade, GitEvent)
//!                /        |          \
//!               v         v           v
//!          status      branch       repo
//!     (porcelain v1) (branch -a, (root, validity
//!            |         remote)    cache)
//!            v                      |
//!          path  <------------------+
//!    (quotes, renames, octal)
//!            |
//!            v
//!          cache (BoundedCache)
//! ```
//!
//! Parsers are pure and never fail; malformed input yields empty results.

pub mod branch;
pub mod cache;
pub mod facade;
pub mod path;
pub mod repo;
pub mod status;

pub use branch::BranchInfo;
pub use facade::{GitEvent, GitFacade, StageAll};
pub use status::{StatusEntry, StatusLists};
