//! Scanner module for file enumeration.
//!
//! Walks a root directory and yields [`FileEntry`] descriptors for the
//! duplicate detector. Traversal is a thin wrapper over `walkdir`: hidden
//! entries are excluded by policy and inaccessible entries are skipped
//! with a warning rather than failing the run.

pub mod walker;

pub use walker::Walker;

use std::path::PathBuf;

/// Metadata for one enumerated file.
///
/// Immutable once produced by the walker; no later stage mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Lowercased extension without the leading dot; empty if none
    pub extension: String,
}

impl FileEntry {
    /// Create a new entry, deriving the normalized extension from the path.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        Self {
            path,
            size,
            extension,
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into subdirectories. Off by default: only the top level
    /// of the root is checked.
    pub recursive: bool,

    /// Extension allow-list; empty means no filtering.
    /// Entries are normalized (leading dot stripped, lowercased).
    pub extensions: Vec<String>,
}

impl WalkerConfig {
    /// Create a configuration from CLI arguments, normalizing the
    /// extension allow-list.
    #[must_use]
    pub fn new(recursive: bool, extensions: Vec<String>) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        Self {
            recursive,
            extensions,
        }
    }

    /// Check whether a file with the given normalized extension passes
    /// the allow-list.
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.is_empty() || self.extensions.iter().any(|e| e == extension)
    }
}
