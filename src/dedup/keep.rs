//! Keep strategies: which file of a duplicate group survives.
//!
//! Every strategy is a total, deterministic function of its input - given
//! the same paths (and stable mtimes) it always returns the same result,
//! which keeps dry-run logs reproducible across runs even though the
//! grouping phase drains hashes in a nondeterministic order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Chooses exactly one file of a duplicate group to retain.
pub trait KeepStrategy {
    /// Split `paths` into the file to keep and the files to remove.
    ///
    /// `paths` always holds at least two entries (a duplicate group).
    fn select(&self, paths: &[PathBuf]) -> (PathBuf, Vec<PathBuf>);
}

/// Named keep-strategy variants for the CLI and the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeepStrategyKind {
    /// Keep the file with the oldest modification time.
    #[default]
    Oldest,
    /// Keep the file with the shortest path.
    ShortPath,
}

impl KeepStrategyKind {
    /// Build the strategy this variant names.
    #[must_use]
    pub fn build(self) -> Box<dyn KeepStrategy> {
        match self {
            Self::Oldest => Box::new(OldestFile),
            Self::ShortPath => Box::new(ShortestPath),
        }
    }
}

/// Keeps the file with the oldest modification time.
///
/// Ties break by lexical path order. Paths whose metadata cannot be read
/// sort after all readable ones, again by lexical order, so the result
/// stays a total order even on a half-broken tree.
#[derive(Debug, Default)]
pub struct OldestFile;

impl KeepStrategy for OldestFile {
    fn select(&self, paths: &[PathBuf]) -> (PathBuf, Vec<PathBuf>) {
        let mut keyed: Vec<(Option<SystemTime>, PathBuf)> = paths
            .iter()
            .map(|p| (mtime(p), p.clone()))
            .collect();
        keyed.sort_by(|a, b| match (a.0, b.0) {
            (Some(ta), Some(tb)) => ta.cmp(&tb).then_with(|| a.1.cmp(&b.1)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.1.cmp(&b.1),
        });

        let mut sorted: Vec<PathBuf> = keyed.into_iter().map(|(_, p)| p).collect();
        let keep = sorted.remove(0);
        (keep, sorted)
    }
}

/// Keeps the file with the shortest path.
///
/// Ties break by lexical path order.
#[derive(Debug, Default)]
pub struct ShortestPath;

impl KeepStrategy for ShortestPath {
    fn select(&self, paths: &[PathBuf]) -> (PathBuf, Vec<PathBuf>) {
        let mut sorted = paths.to_vec();
        sorted.sort_by(|a, b| {
            a.as_os_str()
                .len()
                .cmp(&b.as_os_str().len())
                .then_with(|| a.cmp(b))
        });

        let keep = sorted.remove(0);
        (keep, sorted)
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => Some(t),
        Err(e) => {
            log::warn!("could not stat {}: {e}", path.display());
            None
        }
    }
}
