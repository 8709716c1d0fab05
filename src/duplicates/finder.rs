//! Duplicate detection within size groups and the parallel group harness.
//!
//! Each eligible size group (2+ members) is handed to one worker in a
//! bounded rayon pool. Workers share nothing except the result
//! aggregator, a mutex-guarded vector that each worker extends under
//! lock; the per-group tracking state is local to the worker. The run
//! blocks until every dispatched group finishes, and the first comparison
//! I/O error aborts the whole run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

use super::compare::{compare, CompareError};
use super::groups::{group_by_size_structured, SizeGroup};
use crate::scanner::{FileEntry, Walker, WalkerConfig};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Maximum number of size groups compared in parallel.
    pub threads: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self { threads: 10 }
    }
}

impl FinderConfig {
    /// Set the worker-pool bound (clamped to at least 1).
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

/// Errors that abort a finder run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root location does not exist.
    #[error("location doesn't exist: {0}")]
    LocationMissing(PathBuf),

    /// The root location is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The root location could not be canonicalized.
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        /// The root path as given
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A pairwise comparison failed; partial results would be misleading.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Counters reported after a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinderSummary {
    /// Number of files enumerated
    pub total_files: usize,
    /// Total size of enumerated files in bytes
    pub total_size: u64,
    /// Number of distinct file sizes
    pub size_groups: usize,
    /// Groups with a single member (never dispatched)
    pub singleton_groups: usize,
    /// Groups with 2+ members
    pub eligible_groups: usize,
    /// Pairwise comparisons performed
    pub comparisons: usize,
    /// Comparisons that reached the full-digest stage
    pub digest_confirmations: usize,
    /// Number of files reported as duplicates
    pub duplicate_files: usize,
}

/// Result of scanning one size group.
#[derive(Debug, Default)]
struct GroupOutcome {
    duplicates: Vec<FileEntry>,
    comparisons: usize,
    digests: usize,
}

/// Find files within one size group that duplicate an earlier member.
///
/// Candidates are scanned in group order. A file already flagged as a
/// duplicate is skipped both as a comparison source and as a target, so
/// each file is flagged at most once and the earliest copy of any content
/// is always the retained original. Files compared against all later
/// members without a match are unique within the group.
fn detect_in_group(group: &SizeGroup) -> Result<GroupOutcome, CompareError> {
    let files = &group.files;
    let mut flagged: HashSet<usize> = HashSet::new();
    let mut outcome = GroupOutcome::default();

    for i in 0..files.len() {
        if flagged.contains(&i) {
            continue;
        }
        for j in (i + 1)..files.len() {
            if flagged.contains(&j) {
                continue;
            }
            let result = compare(&files[i].path, &files[j].path, group.size)?;
            outcome.comparisons += 1;
            if result.used_digest() {
                outcome.digests += 1;
            }
            if result.is_duplicate() {
                log::debug!(
                    "{} duplicates {}",
                    files[j].path.display(),
                    files[i].path.display()
                );
                flagged.insert(j);
            }
        }
    }

    outcome.duplicates = files
        .iter()
        .enumerate()
        .filter(|(idx, _)| flagged.contains(idx))
        .map(|(_, file)| file.clone())
        .collect();
    Ok(outcome)
}

/// Content-based duplicate finder.
///
/// Ties enumeration, size grouping, and the parallel pairwise detection
/// together behind one call.
#[derive(Debug)]
pub struct DuplicateFinder {
    walker_config: WalkerConfig,
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with explicit walker and finder configuration.
    #[must_use]
    pub fn new(walker_config: WalkerConfig, config: FinderConfig) -> Self {
        Self {
            walker_config,
            config,
        }
    }

    /// Create a finder with default configuration (top-level only, no
    /// extension filter, 10 parallel group workers).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(WalkerConfig::default(), FinderConfig::default())
    }

    /// Scan `root` and return the duplicate set plus run counters.
    ///
    /// The returned entries are unordered and each appears at most once;
    /// for every reported file an earlier-enumerated identical copy was
    /// retained. Root validation failures and comparison I/O errors abort
    /// the run before anything is returned.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<FileEntry>, FinderSummary), FinderError> {
        let root = self.resolve_root(root)?;

        let files: Vec<FileEntry> = Walker::new(&root, self.walker_config.clone())
            .walk()
            .collect();
        log::info!("enumerated {} files under {}", files.len(), root.display());

        let (groups, stats) = group_by_size_structured(files);
        let mut summary = FinderSummary {
            total_files: stats.total_files,
            total_size: stats.total_size,
            size_groups: stats.unique_sizes,
            singleton_groups: stats.singleton_groups,
            eligible_groups: stats.eligible_groups,
            ..FinderSummary::default()
        };

        // Singletons stay in the partition but never occupy a worker slot.
        let eligible: Vec<&SizeGroup> = groups.iter().filter(|g| g.has_duplicates()).collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("failed to create bounded thread pool ({e}), using default");
                rayon::ThreadPoolBuilder::new().build().unwrap()
            });

        let found: Mutex<Vec<FileEntry>> = Mutex::new(Vec::new());
        let comparisons = AtomicUsize::new(0);
        let digests = AtomicUsize::new(0);

        // install() returns only once every dispatched group has finished;
        // the first comparison error short-circuits the remaining groups.
        pool.install(|| {
            eligible.par_iter().try_for_each(|&group| {
                log::debug!("checking group size {} ({} files)", group.size, group.len());
                let outcome = detect_in_group(group)?;
                comparisons.fetch_add(outcome.comparisons, Ordering::Relaxed);
                digests.fetch_add(outcome.digests, Ordering::Relaxed);
                if !outcome.duplicates.is_empty() {
                    found
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .extend(outcome.duplicates);
                }
                Ok::<(), CompareError>(())
            })
        })?;

        let duplicates = found
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        summary.comparisons = comparisons.into_inner();
        summary.digest_confirmations = digests.into_inner();
        summary.duplicate_files = duplicates.len();

        log::info!(
            "{} comparisons across {} groups, {} duplicates",
            summary.comparisons,
            summary.eligible_groups,
            summary.duplicate_files
        );

        Ok((duplicates, summary))
    }

    /// Validate and canonicalize the root location before any scanning.
    fn resolve_root(&self, root: &Path) -> Result<PathBuf, FinderError> {
        if !root.exists() {
            return Err(FinderError::LocationMissing(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }
        std::fs::canonicalize(root).map_err(|e| FinderError::Resolve {
            path: root.to_path_buf(),
            source: e,
        })
    }
}
