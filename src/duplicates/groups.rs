//! Size-based file grouping.
//!
//! Grouping by exact byte length is the first stage of duplicate
//! detection: files of different sizes cannot be duplicates, so each size
//! group can be checked independently. Singleton groups stay in the
//! partition but are never dispatched to a comparison worker.

use std::collections::HashMap;

use crate::scanner::FileEntry;

/// A group of files sharing one exact byte length.
#[derive(Debug, Clone)]
pub struct SizeGroup {
    /// File size in bytes (shared by all files in this group)
    pub size: u64,
    /// Files with this exact size, in enumeration order
    pub files: Vec<FileEntry>,
}

impl SizeGroup {
    /// Create an empty group for the given size.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            files: Vec::new(),
        }
    }

    /// Create a group with initial files.
    #[must_use]
    pub fn with_files(size: u64, files: Vec<FileEntry>) -> Self {
        Self { size, files }
    }

    /// Add a file to this group.
    ///
    /// A size mismatch here is a grouping bug, not an input condition,
    /// and is caught by a debug assertion.
    pub fn add(&mut self, file: FileEntry) {
        debug_assert_eq!(
            file.size, self.size,
            "file size {} does not match group size {}",
            file.size, self.size
        );
        self.files.push(file);
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this group can contain duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }
}

/// Statistics from the size-grouping stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files grouped
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of distinct file sizes (= number of groups)
    pub unique_sizes: usize,
    /// Number of groups holding exactly one file
    pub singleton_groups: usize,
    /// Number of groups with 2+ files
    pub eligible_groups: usize,
    /// Number of files in eligible groups
    pub eligible_files: usize,
}

/// Partition files by exact byte length.
///
/// Pure in-memory operation; no file I/O. Every input file lands in
/// exactly one group, including zero-byte files, and singleton groups are
/// retained (the detector skips them later). An empty input yields an
/// empty partition.
#[must_use]
pub fn group_by_size(
    files: impl IntoIterator<Item = FileEntry>,
) -> (HashMap<u64, Vec<FileEntry>>, GroupingStats) {
    let mut groups: HashMap<u64, Vec<FileEntry>> = HashMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;
        groups.entry(file.size).or_default().push(file);
    }

    stats.unique_sizes = groups.len();
    for (size, members) in &groups {
        if members.len() > 1 {
            stats.eligible_groups += 1;
            stats.eligible_files += members.len();
            log::debug!("size group {size}: {} candidates", members.len());
        } else {
            stats.singleton_groups += 1;
        }
    }

    log::info!(
        "grouped {} files into {} size groups, {} eligible for comparison",
        stats.total_files,
        stats.unique_sizes,
        stats.eligible_groups
    );

    (groups, stats)
}

/// Partition files by size, returning [`SizeGroup`] structs sorted by
/// size descending.
#[must_use]
pub fn group_by_size_structured(
    files: impl IntoIterator<Item = FileEntry>,
) -> (Vec<SizeGroup>, GroupingStats) {
    let (groups_map, stats) = group_by_size(files);

    let mut groups: Vec<SizeGroup> = groups_map
        .into_iter()
        .map(|(size, files)| SizeGroup::with_files(size, files))
        .collect();
    groups.sort_by(|a, b| b.size.cmp(&a.size));

    (groups, stats)
}
