//! Command-line interface definitions for imagededup.
//!
//! All CLI arguments are defined with the clap derive API. Every tunable has
//! a matching config-file field; the precedence is flag > config file >
//! built-in default, resolved in [`crate::run_app`].
//!
//! # Example
//!
//! ```bash
//! # Report duplicates without touching anything
//! imagededup ~/Pictures --dry-run
//!
//! # Move duplicates to a custom trash directory, keeping the shortest path
//! imagededup ~/Pictures --trash-dir /tmp/dupes --keep short-path
//!
//! # Looser matching with more hashing threads
//! imagededup ~/Pictures --threshold 8 --workers 16
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::dedup::KeepStrategyKind;

/// Near-duplicate image finder.
///
/// Scans a directory tree for images, groups files that a perceptual hash
/// considers visually identical (within a Hamming-distance threshold), keeps
/// one file per group and moves the rest to a trash directory - or, with
/// `--dry-run`, only writes a CSV log of what would happen.
#[derive(Debug, Parser)]
#[command(name = "imagededup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicate images
    #[arg(value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE", env = "IMAGEDEDUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory duplicates are moved into (default: <PATH>/.trash)
    #[arg(long, value_name = "DIR")]
    pub trash_dir: Option<PathBuf>,

    /// Number of hashing worker threads (default: number of CPUs)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Which file of a duplicate group to keep
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub keep: Option<KeepStrategyKind>,

    /// Maximum Hamming distance for two images to count as duplicates (inclusive)
    #[arg(long, value_name = "N")]
    pub threshold: Option<u32>,

    /// Log duplicates to a CSV file instead of moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// CSV file the dry run writes to (default: dedup_dry_run_log.csv)
    #[arg(long, value_name = "FILE", requires = "dry_run")]
    pub log: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
