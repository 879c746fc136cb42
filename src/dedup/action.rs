//! Action strategies: what happens to the losers of a duplicate group.
//!
//! An [`ActionStrategy`] moves through three states:
//! uninitialized → ready (after [`setup`](ActionStrategy::setup)) →
//! torn down (after [`teardown`](ActionStrategy::teardown)). Setup failure
//! aborts the whole run before any file is touched. Execute never fails the
//! run; per-file errors are logged and the remaining files still get
//! processed. Teardown always runs after a successful setup.
//!
//! One strategy instance owns its trash directory or CSV log file for the
//! duration of a run; two instances must not target the same log path
//! concurrently.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Default file name for the dry-run CSV log.
pub const DEFAULT_DRY_RUN_LOG: &str = "dedup_dry_run_log.csv";

/// Errors that can occur during action setup.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The trash directory could not be created.
    #[error("failed to create trash directory {path}: {source}")]
    CreateTrashDir {
        /// The directory that could not be created.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dry-run CSV log could not be created or its header written.
    #[error("failed to create dry-run log {path}: {source}")]
    CreateLog {
        /// The log file that could not be created.
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Side effect applied to each duplicate group.
pub trait ActionStrategy {
    /// Prepare side-effect resources (trash directory, log file).
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if preparation cannot succeed; the run is
    /// aborted before any file is processed.
    fn setup(&mut self) -> Result<(), ActionError>;

    /// Apply the action to one duplicate group.
    ///
    /// Per-file failures are logged; the rest of the group and subsequent
    /// groups are still processed.
    fn execute(&mut self, to_keep: &Path, to_remove: &[PathBuf]);

    /// Flush and release resources. Always invoked after a successful
    /// setup, even if execute hit per-file errors.
    fn teardown(&mut self);
}

/// Moves duplicate files into a trash directory instead of deleting them.
///
/// Each file is renamed (not copied) to
/// `<trash_dir>/<unix-nanos>_<original-basename>`; the timestamp prefix
/// keeps files with identical base names from colliding.
#[derive(Debug)]
pub struct MoveToTrash {
    trash_dir: PathBuf,
}

impl MoveToTrash {
    /// Create a strategy targeting the given trash directory.
    #[must_use]
    pub fn new(trash_dir: PathBuf) -> Self {
        Self { trash_dir }
    }
}

impl ActionStrategy for MoveToTrash {
    fn setup(&mut self) -> Result<(), ActionError> {
        log::info!("moving duplicates to trash directory {}", self.trash_dir.display());
        fs::create_dir_all(&self.trash_dir).map_err(|source| ActionError::CreateTrashDir {
            path: self.trash_dir.clone(),
            source,
        })
    }

    fn execute(&mut self, _to_keep: &Path, to_remove: &[PathBuf]) {
        for path in to_remove {
            let base = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let unique = format!("{}_{}", unix_nanos(), base);
            let target = self.trash_dir.join(unique);

            log::info!("moving {} -> {}", path.display(), target.display());
            if let Err(e) = fs::rename(path, &target) {
                // The file stays in place; the rest of the group is still handled.
                log::error!("failed to move {} to trash: {e}", path.display());
            }
        }
    }

    fn teardown(&mut self) {}
}

/// Logs `(keep, duplicate)` pairs to a CSV file without touching any image.
///
/// The CSV gets one header row followed by one row per file that would be
/// removed - a group of three produces two rows sharing the same keep value.
pub struct DryRun {
    csv_path: PathBuf,
    header: Vec<String>,
    writer: Option<csv::Writer<File>>,
}

impl DryRun {
    /// Create a dry run writing to `csv_path` with the default
    /// `Original,Duplicate` header.
    #[must_use]
    pub fn new(csv_path: PathBuf) -> Self {
        Self::with_header(
            csv_path,
            vec!["Original".to_string(), "Duplicate".to_string()],
        )
    }

    /// Create a dry run with a custom (e.g. localized) header row.
    #[must_use]
    pub fn with_header(csv_path: PathBuf, header: Vec<String>) -> Self {
        Self {
            csv_path,
            header,
            writer: None,
        }
    }
}

impl ActionStrategy for DryRun {
    fn setup(&mut self) -> Result<(), ActionError> {
        log::info!("dry run active; no files will be modified");
        let make_err = |source| ActionError::CreateLog {
            path: self.csv_path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&self.csv_path).map_err(make_err)?;
        writer.write_record(&self.header).map_err(make_err)?;
        self.writer = Some(writer);
        Ok(())
    }

    fn execute(&mut self, to_keep: &Path, to_remove: &[PathBuf]) {
        for path in to_remove {
            log::info!(
                "[dry run] potential duplicate: {} (original: {})",
                path.display(),
                to_keep.display()
            );
            if let Some(writer) = self.writer.as_mut() {
                let row = [
                    to_keep.to_string_lossy().into_owned(),
                    path.to_string_lossy().into_owned(),
                ];
                if let Err(e) = writer.write_record(&row) {
                    log::error!("failed to log duplicate {}: {e}", path.display());
                }
            }
        }
    }

    fn teardown(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                log::error!("failed to flush dry-run log: {e}");
            }
            log::info!("dry-run log written to {}", self.csv_path.display());
        }
    }
}

/// Nanoseconds since the Unix epoch, for collision-free trash names.
fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}
