//! Scanner module: candidate discovery and perceptual hashing.
//!
//! Duplicate detection starts with a cheap pre-filter: files that do not
//! share their exact byte size with at least one other file cannot be exact
//! duplicates and are very unlikely near-duplicates worth hashing, so only
//! size buckets with two or more members proceed to the (much more
//! expensive) hashing phase in [`perceptual`].
//!
//! # Example
//!
//! ```no_run
//! use imagededup::scanner::SizeScanner;
//! use std::collections::HashSet;
//! use std::path::Path;
//!
//! let exts: HashSet<String> = [".jpg", ".png"].iter().map(|e| e.to_string()).collect();
//! let scanner = SizeScanner::new(exts);
//! for (size, paths) in scanner.scan(Path::new("/photos")) {
//!     println!("{} candidates of {} bytes", paths.len(), size);
//! }
//! ```

pub mod perceptual;

pub use perceptual::{HashError, ImageHashInfo, PerceptualHasher};

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Walks a directory tree and groups candidate files by exact byte size.
///
/// Only regular, non-empty files whose lowercase extension is in the allowed
/// set are considered. Walk and metadata errors are logged and skipped, so a
/// single unreadable entry never aborts the scan.
#[derive(Debug)]
pub struct SizeScanner {
    /// Allowed extensions, lowercase, with leading dot (e.g. ".jpg").
    allowed_exts: HashSet<String>,
}

impl SizeScanner {
    /// Create a scanner that accepts the given extensions.
    ///
    /// Extensions are expected lowercase with a leading dot; matching
    /// against file names is case-insensitive.
    #[must_use]
    pub fn new(allowed_exts: HashSet<String>) -> Self {
        Self { allowed_exts }
    }

    /// Scan the tree under `root` and return size buckets with ≥2 members.
    ///
    /// Buckets with a single member are dropped before returning: a file
    /// without a size partner cannot have a duplicate by this metric, so it
    /// never reaches the hashing phase.
    pub fn scan(&self, root: &Path) -> HashMap<u64, Vec<PathBuf>> {
        let mut sizes: HashMap<u64, Vec<PathBuf>> = HashMap::new();

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("error accessing path during scan: {e}");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if !self.is_allowed(entry.path()) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    log::warn!("error reading metadata for {}: {e}", entry.path().display());
                    continue;
                }
            };
            if size == 0 {
                continue;
            }

            sizes.entry(size).or_default().push(entry.into_path());
        }

        sizes.retain(|_, paths| paths.len() >= 2);
        sizes
    }

    /// Check whether a path carries one of the allowed extensions.
    fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .is_some_and(|e| self.allowed_exts.contains(&e))
    }
}
