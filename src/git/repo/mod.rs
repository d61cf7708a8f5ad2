// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Active repository root and its memo caches.
//!
//! Only the consumer thread touches this state; workers never see it.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::git::cache::BoundedCache;
use crate::git::path::{PATH_CACHE_CAPACITY, PathParser};

/// Number of validity checks kept.
pub const REPO_CACHE_CAPACITY: usize = 32;

/// Whether `path` is a directory holding a `.git` entry.
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
#[must_use]
pub fn check_git_repo(path: &Path) -> bool {
    path.is_dir() && path.join(".git").exists()
}

#[derive(Debug, Clone)]
pub struct RepositoryState {
    root: PathBuf,
    repo_cache: BoundedCache<PathBuf, bool>,
    paths: PathParser,
}

impl RepositoryState {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_capacities(root, REPO_CACHE_CAPACITY, PATH_CACHE_CAPACITY)
    }

    /// Capacities of 0 disable the respective cache.
    pub fn with_capacities(root: impl Into<PathBuf>, repo: usize, path: usize) -> Self {
        Self {
            root: root.into(),
            repo_cache: BoundedCache::new(repo),
            paths: PathParser::new(path),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Points at a new root, dropping every cached value.
    ///
    /// Returns whether the new root is a repository.
    pub fn switch_repository(&mut self, root: impl Into<PathBuf>) -> bool {
        self.root = root.into();
        self.clear_caches();
        let valid = self.is_valid();
        info!(root = %self.root.display(), valid, "switched repository");
        valid
    }

    /// Memoized [`check_git_repo`].
    pub fn is_git_repo(&mut self, path: &Path) -> bool {
        self.repo_cache
            .get_or_insert_with(path.to_path_buf(), |p| check_git_repo(p))
    }

    /// Whether the current root is a repository.
    pub fn is_valid(&mut self) -> bool {
        let root = self.root.clone();
        self.is_git_repo(&root)
    }

    pub fn clear_caches(&mut self) {
        debug!("clearing repository caches");
        self.repo_cache.clear();
        self.paths.clear();
    }

    /// Decodes a path field through the memoized parser.
    pub fn parse_path(&mut self, raw: &str) -> String {
        self.paths.parse(raw)
    }

    /// The memoized parser, for feeding whole status listings.
    pub fn paths_mut(&mut self) -> &mut PathParser {
        &mut self.paths
    }
}
