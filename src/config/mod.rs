// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitdeck.toml in the repository root (optional)
//! 3. --ini files
//! 4. GITDECK_* env vars
//! 5. CLI overrides (-s key=value)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITDECK_GIT__TIMEOUT_SECS=60              → git.timeout_secs = 60
//! GITDECK_GIT__EXCLUDE_PATTERNS=*.log,tmp/* → git.exclude_patterns = [..]
//! GITDECK_DISPLAY__MAX_ENTRIES=50           → display.max_entries = 50
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

pub use loader::ConfigLoader;
pub use types::{DisplayConfig, GitConfig, GlobalConfig};

/// Default configuration file name, looked up in the repository root.
pub const CONFIG_FILE_NAME: &str = "gitdeck.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GITDECK";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub git: GitConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// # Example
    ///
    /// ```no_run
    /// use gitdeck::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitdeck.toml")
    ///     .with_env_prefix("GITDECK")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// # Errors
    ///
    /// Returns the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        Ok(())
    }

    /// `key = value` lines, sorted by key and aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("git.timeout_secs", self.git.timeout_secs.to_string());
        options.insert("git.exclude_patterns", self.git.exclude_patterns.join(", "));
        options.insert(
            "git.protected_branches",
            self.git.protected_branches.join(", "),
        );
        options.insert("display.max_entries", self.display.max_entries.to_string());

        let max_key_len = options.keys().map(|key| key.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
