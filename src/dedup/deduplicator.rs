//! Pipeline orchestrator: scan → hash → group → act.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::scanner::{PerceptualHasher, SizeScanner};

use super::{group_duplicates, ActionError, ActionStrategy, KeepStrategy};

/// Settings for one deduplication run.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Root directory to scan.
    pub target_path: PathBuf,
    /// Number of hashing worker threads (clamped to ≥1).
    pub num_workers: usize,
    /// Allowed extensions, lowercase, with leading dot.
    pub allowed_exts: HashSet<String>,
    /// Inclusive Hamming-distance threshold for grouping.
    pub threshold: u32,
}

/// Aggregate counts reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupSummary {
    /// Files that survived the size pre-filter.
    pub candidate_files: usize,
    /// Candidates successfully hashed.
    pub hashed_files: usize,
    /// Duplicate groups found.
    pub groups_found: usize,
    /// Files that were (or would be) removed across all groups.
    pub files_to_remove: usize,
}

/// Runs the deduplication pipeline exactly once per invocation.
///
/// Strategies are injected at construction time; the orchestrator holds no
/// other state between runs and consults no globals.
pub struct Deduplicator {
    config: DedupConfig,
    keep: Box<dyn KeepStrategy>,
    action: Box<dyn ActionStrategy>,
}

impl Deduplicator {
    /// Create a deduplicator with the given configuration and strategies.
    #[must_use]
    pub fn new(
        config: DedupConfig,
        keep: Box<dyn KeepStrategy>,
        action: Box<dyn ActionStrategy>,
    ) -> Self {
        Self {
            config,
            keep,
            action,
        }
    }

    /// Run the full pipeline and return aggregate counts.
    ///
    /// Once setup has succeeded, teardown runs no matter what the per-group
    /// actions encountered; moved files are never rolled back.
    ///
    /// # Errors
    ///
    /// Returns an [`ActionError`] if action setup fails; in that case no
    /// file has been scanned or touched.
    pub fn run(&mut self) -> Result<DedupSummary, ActionError> {
        log::info!(
            "duplicate search started in {}",
            self.config.target_path.display()
        );
        self.action.setup()?;

        let scanner = SizeScanner::new(self.config.allowed_exts.clone());
        let sizes = scanner.scan(&self.config.target_path);
        let candidates: Vec<PathBuf> = sizes.into_values().flatten().collect();
        log::info!("{} candidate file(s) after size pre-filter", candidates.len());

        let hasher = PerceptualHasher::new();
        let hashes = hasher.hash_all(&candidates, self.config.num_workers);
        log::info!("hashing finished: {} file(s) hashed", hashes.len());

        let groups = group_duplicates(&hashes, self.config.threshold);

        let mut summary = DedupSummary {
            candidate_files: candidates.len(),
            hashed_files: hashes.len(),
            groups_found: groups.len(),
            files_to_remove: 0,
        };

        for group in &groups {
            let (to_keep, to_remove) = self.keep.select(&group.files);
            summary.files_to_remove += to_remove.len();
            log::info!(
                "duplicate group found, keeping {} (threshold {})",
                to_keep.display(),
                self.config.threshold
            );
            self.action.execute(&to_keep, &to_remove);
        }

        self.action.teardown();
        log::info!("duplicate search finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::KeepStrategyKind;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    /// Records lifecycle calls so tests can assert ordering and payloads.
    #[derive(Default)]
    struct RecordingAction {
        calls: Arc<Mutex<Vec<String>>>,
        fail_setup: bool,
    }

    impl ActionStrategy for RecordingAction {
        fn setup(&mut self) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push("setup".to_string());
            if self.fail_setup {
                return Err(ActionError::CreateTrashDir {
                    path: PathBuf::from("/denied"),
                    source: std::io::Error::other("denied"),
                });
            }
            Ok(())
        }

        fn execute(&mut self, to_keep: &Path, to_remove: &[PathBuf]) {
            self.calls.lock().unwrap().push(format!(
                "execute keep={} remove={}",
                to_keep.display(),
                to_remove.len()
            ));
        }

        fn teardown(&mut self) {
            self.calls.lock().unwrap().push("teardown".to_string());
        }
    }

    fn config_for(dir: &Path) -> DedupConfig {
        DedupConfig {
            target_path: dir.to_path_buf(),
            num_workers: 2,
            allowed_exts: [".png".to_string()].into_iter().collect(),
            threshold: 0,
        }
    }

    #[test]
    fn test_run_on_empty_tree() {
        let dir = tempfile::TempDir::new().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let action = RecordingAction {
            calls: Arc::clone(&calls),
            fail_setup: false,
        };

        let mut dedup = Deduplicator::new(
            config_for(dir.path()),
            KeepStrategyKind::Oldest.build(),
            Box::new(action),
        );
        let summary = dedup.run().unwrap();

        assert_eq!(summary, DedupSummary::default());
        assert_eq!(*calls.lock().unwrap(), vec!["setup", "teardown"]);
    }

    #[test]
    fn test_setup_failure_aborts_before_scan() {
        let dir = tempfile::TempDir::new().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let action = RecordingAction {
            calls: Arc::clone(&calls),
            fail_setup: true,
        };

        let mut dedup = Deduplicator::new(
            config_for(dir.path()),
            KeepStrategyKind::Oldest.build(),
            Box::new(action),
        );

        assert!(dedup.run().is_err());
        // Neither execute nor teardown may run after a failed setup.
        assert_eq!(*calls.lock().unwrap(), vec!["setup"]);
    }

    #[test]
    fn test_run_executes_once_per_group() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = image::RgbImage::from_fn(24, 24, |x, y| {
            image::Rgb([(x * 10) as u8, (y * 10) as u8, 0])
        });
        base.save(dir.path().join("a.png")).unwrap();
        std::fs::copy(dir.path().join("a.png"), dir.path().join("b.png")).unwrap();

        let calls = Arc::new(Mutex::new(Vec::new()));
        let action = RecordingAction {
            calls: Arc::clone(&calls),
            fail_setup: false,
        };

        let mut dedup = Deduplicator::new(
            config_for(dir.path()),
            KeepStrategyKind::ShortPath.build(),
            Box::new(action),
        );
        let summary = dedup.run().unwrap();

        assert_eq!(summary.candidate_files, 2);
        assert_eq!(summary.hashed_files, 2);
        assert_eq!(summary.groups_found, 1);
        assert_eq!(summary.files_to_remove, 1);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.first().map(String::as_str), Some("setup"));
        assert_eq!(calls.last().map(String::as_str), Some("teardown"));
        assert_eq!(calls.len(), 3);
        assert!(calls[1].starts_with("execute keep="));
        assert!(calls[1].ends_with("remove=1"));
    }
}
