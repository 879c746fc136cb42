//! imagededup - Near-Duplicate Image Finder
//!
//! A CLI tool that locates near-duplicate images in a directory tree using
//! perceptual hashing (difference hash), and either logs the findings to a
//! CSV file (dry run) or moves the duplicates into a trash directory.

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod scanner;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::dedup::{ActionStrategy, DedupConfig, Deduplicator, DryRun, MoveToTrash};
use crate::error::ExitCode;

/// Run the application with parsed CLI arguments.
///
/// Loads the optional config file, resolves every setting with
/// flag > config file > default precedence, wires the strategies into the
/// [`Deduplicator`] and runs the pipeline once.
///
/// # Errors
///
/// Returns an error if the config file cannot be read, no source directory
/// is given, the source directory does not exist, or action setup fails
/// (e.g. the trash directory cannot be created).
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    let source = cli
        .source
        .clone()
        .or_else(|| config.source.clone())
        .context("no source directory given (pass a PATH argument or set `source` in the config file)")?;
    if !source.is_dir() {
        bail!("source directory does not exist: {}", source.display());
    }

    let dry_run = cli.dry_run || config.dry_run;
    let keep_kind = cli.keep.unwrap_or(config.deduplicator.keep_strategy);
    let threshold = cli.threshold.unwrap_or(config.deduplicator.threshold);
    let workers = cli.workers.unwrap_or_else(default_workers);

    let allowed_exts: HashSet<String> = config
        .allowed_extensions
        .iter()
        .map(|e| e.to_lowercase())
        .collect();

    let action: Box<dyn ActionStrategy> = if dry_run {
        let csv_path = cli
            .log
            .clone()
            .unwrap_or_else(|| PathBuf::from(dedup::DEFAULT_DRY_RUN_LOG));
        Box::new(DryRun::new(csv_path))
    } else {
        let trash_dir = cli.trash_dir.clone().unwrap_or_else(|| source.join(".trash"));
        Box::new(MoveToTrash::new(trash_dir))
    };

    let dedup_config = DedupConfig {
        target_path: source,
        num_workers: workers,
        allowed_exts,
        threshold,
    };

    let mut deduplicator = Deduplicator::new(dedup_config, keep_kind.build(), action);
    let summary = deduplicator.run()?;

    if summary.groups_found > 0 {
        println!(
            "Found {} duplicate group(s); {} file(s) marked for removal.",
            summary.groups_found, summary.files_to_remove
        );
        Ok(ExitCode::Success)
    } else {
        println!("No duplicates found.");
        Ok(ExitCode::NoDuplicates)
    }
}

/// Default hashing worker count: one per available CPU.
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}
