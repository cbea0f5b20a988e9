//! Plugin options and their TOML-backed store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// User-tunable plugin options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Seconds to wait before handing new content to the node for insertion
    #[serde(default = "default_insertion_delay_secs")]
    pub insertion_delay_secs: u64,
    /// Whether the web interface is restricted to fully-trusted hosts
    #[serde(default)]
    pub require_full_access: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            insertion_delay_secs: default_insertion_delay_secs(),
            require_full_access: false,
        }
    }
}

fn default_insertion_delay_secs() -> u64 {
    60
}

/// Loads and saves [`Options`] as a TOML file.
#[derive(Debug, Clone)]
pub struct OptionsStore {
    path: PathBuf,
}

impl OptionsStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the options. A missing file yields the defaults.
    pub fn load(&self) -> Result<Options> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no options file, using defaults");
            return Ok(Options::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Saves the options, creating parent directories as needed.
    pub fn save(&self, options: &Options) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(options)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "saved options");
        Ok(())
    }
}
