//! Application configuration loading.
//!
//! Settings come from an optional TOML file. Every field has a default, so a
//! missing file (or a file that only sets a few keys) works fine. CLI flags
//! override anything set here; the layering happens in [`crate::run_app`].
//!
//! # Example
//!
//! ```toml
//! source = "/home/user/Pictures"
//! dry_run = true
//! allowed_extensions = [".jpg", ".jpeg", ".png"]
//!
//! [deduplicator]
//! keep_strategy = "short-path"
//! threshold = 8
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dedup::KeepStrategyKind;

/// Top-level application configuration, mirroring the config file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default directory to scan; overridden by the PATH argument.
    pub source: Option<PathBuf>,

    /// Log duplicates instead of moving them; overridden by `--dry-run`.
    pub dry_run: bool,

    /// File extensions (with leading dot) eligible for deduplication.
    /// Matched case-insensitively.
    pub allowed_extensions: Vec<String>,

    /// Settings for the deduplication pipeline.
    pub deduplicator: DeduplicatorSettings,
}

/// Settings specific to the deduplication pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeduplicatorSettings {
    /// Which file of a duplicate group survives.
    pub keep_strategy: KeepStrategyKind,

    /// Inclusive Hamming-distance threshold for two hashes to match.
    pub threshold: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            dry_run: false,
            allowed_extensions: vec![
                ".jpg".to_string(),
                ".jpeg".to_string(),
                ".png".to_string(),
                ".raw".to_string(),
            ],
            deduplicator: DeduplicatorSettings::default(),
        }
    }
}

impl Default for DeduplicatorSettings {
    fn default() -> Self {
        Self {
            keep_strategy: KeepStrategyKind::Oldest,
            threshold: 5,
        }
    }
}

impl Config {
    /// Load the configuration from the given path.
    ///
    /// With no path, the built-in defaults are returned. A path that exists
    /// but cannot be read or parsed is an error; a misconfigured run should
    /// fail loudly rather than silently fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("could not parse config file: {}", path.display()))?;
        Ok(config)
    }
}
