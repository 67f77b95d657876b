//! Configuration management for stash.
//!
//! Loads and saves a small JSON config file. Missing file or missing
//! keys fall back to defaults; unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StashError, StashResult};
use crate::listing::OrderPolicy;

/// Database filename used when the config does not name one.
const DEFAULT_DB_FILENAME: &str = ".stashdb";

/// Config filename under the home directory.
const CONFIG_FILENAME: &str = ".stashrc.json";

fn default_limit() -> i64 {
    10
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file; empty means `~/.stashdb`
    #[serde(default)]
    pub database_file: String,
    /// Default listing page size
    #[serde(default = "default_limit")]
    pub default_limit: i64,
    /// Default context lines shown after a match
    #[serde(default)]
    pub after_lines: usize,
    /// Editor override; None falls back to $EDITOR
    #[serde(default)]
    pub editor: Option<String>,
    /// Listing/resolution ordering policy
    #[serde(default)]
    pub order: OrderPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_file: String::new(),
            default_limit: default_limit(),
            after_lines: 0,
            editor: None,
            order: OrderPolicy::default(),
        }
    }
}

impl Config {
    /// Default config file location under the home directory.
    pub fn default_path() -> StashResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| StashError::Config("cannot determine home directory".into()))?;
        Ok(home.join(CONFIG_FILENAME))
    }

    /// Load the config from the given path; a missing file yields defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> StashResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the config from its default location.
    pub fn load_default() -> StashResult<Self> {
        Self::load(Self::default_path()?)
    }

    /// Save the config to the given path as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> StashResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the database path, defaulting to `~/.stashdb`.
    pub fn database_path(&self) -> StashResult<PathBuf> {
        if !self.database_file.is_empty() {
            return Ok(PathBuf::from(&self.database_file));
        }
        let home = dirs::home_dir()
            .ok_or_else(|| StashError::Config("cannot determine home directory".into()))?;
        Ok(home.join(DEFAULT_DB_FILENAME))
    }
}
