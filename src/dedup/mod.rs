//! Deduplication pipeline: grouping, strategy hooks and orchestration.
//!
//! The pipeline runs in four phases: scan (size buckets), hash (perceptual
//! hashes, parallel), group (threshold clustering), act (per-group keep
//! selection plus the configured side effect). Strategies are injected at
//! construction time, never reached through global state:
//!
//! - [`KeepStrategy`] decides which file of a duplicate group survives.
//! - [`ActionStrategy`] decides what happens to the rest, with a
//!   setup / execute / teardown lifecycle.

pub mod action;
pub mod deduplicator;
pub mod grouper;
pub mod keep;

pub use action::{ActionError, ActionStrategy, DryRun, MoveToTrash, DEFAULT_DRY_RUN_LOG};
pub use deduplicator::{DedupConfig, DedupSummary, Deduplicator};
pub use grouper::{group_duplicates, DuplicateGroup};
pub use keep::{KeepStrategy, KeepStrategyKind, OldestFile, ShortestPath};
