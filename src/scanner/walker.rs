//! Directory walker built on `walkdir`.
//!
//! Enumeration never aborts the run: unreadable directories and files are
//! logged and skipped, so only the descriptors of accessible regular
//! files reach the detector.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(root: &Path, config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    /// Walk the root, yielding a descriptor for every eligible file.
    ///
    /// Hidden entries (names starting with `.`) are excluded, symlinks are
    /// not followed, and files rejected by the extension allow-list are
    /// dropped here so the grouping stage only ever sees candidates.
    /// Entries are sorted by file name, which fixes the group order and
    /// therefore which copy of a duplicate is the retained original.
    pub fn walk(&self) -> impl Iterator<Item = FileEntry> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();
        if !self.config.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        walk_dir
            .into_iter()
            .filter_entry(is_not_hidden)
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(entry),
                Err(e) => {
                    log::warn!("skipping inaccessible entry: {e}");
                    None
                }
            })
    }

    fn process_entry(&self, entry: DirEntry) -> Option<FileEntry> {
        // Symlinks are not followed, so only regular files pass here.
        if !entry.file_type().is_file() {
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                log::warn!("skipping {}: {e}", entry.path().display());
                return None;
            }
        };

        let file = FileEntry::new(entry.into_path(), metadata.len());
        if !self.config.accepts_extension(&file.extension) {
            log::trace!("extension filter rejected {}", file.path.display());
            return None;
        }
        Some(file)
    }
}

/// Hidden entries are excluded by policy, but never the root itself.
fn is_not_hidden(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(path: &Path, bytes: &[u8]) {
        File::create(path).unwrap().write_all(bytes).unwrap();
    }

    #[test]
    fn test_walk_top_level_only() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&dir.path().join("top.txt"), b"top");
        touch(&sub.join("nested.txt"), b"nested");

        let walker = Walker::new(dir.path(), WalkerConfig::default());
        let files: Vec<_> = walker.walk().collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("top.txt"));
    }

    #[test]
    fn test_walk_recursive() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&dir.path().join("top.txt"), b"top");
        touch(&sub.join("nested.txt"), b"nested");

        let walker = Walker::new(dir.path(), WalkerConfig::new(true, Vec::new()));
        let files: Vec<_> = walker.walk().collect();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_walk_skips_hidden() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("visible.txt"), b"v");
        touch(&dir.path().join(".hidden.txt"), b"h");
        let hidden_dir = dir.path().join(".git");
        fs::create_dir(&hidden_dir).unwrap();
        touch(&hidden_dir.join("object"), b"o");

        let walker = Walker::new(dir.path(), WalkerConfig::new(true, Vec::new()));
        let files: Vec<_> = walker.walk().collect();

        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("visible.txt"));
    }

    #[test]
    fn test_walk_extension_filter() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.jpg"), b"jpg");
        touch(&dir.path().join("b.PNG"), b"png");
        touch(&dir.path().join("c.txt"), b"txt");
        touch(&dir.path().join("noext"), b"none");

        let config = WalkerConfig::new(false, vec!["jpg".to_string(), ".png".to_string()]);
        let walker = Walker::new(dir.path(), config);
        let mut names: Vec<String> = walker
            .walk()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.jpg".to_string(), "b.PNG".to_string()]);
    }

    #[test]
    fn test_walk_reports_sizes() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("five.bin"), b"12345");

        let walker = Walker::new(dir.path(), WalkerConfig::default());
        let files: Vec<_> = walker.walk().collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 5);
    }

    #[test]
    fn test_walk_includes_empty_files() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("empty"), b"");

        let walker = Walker::new(dir.path(), WalkerConfig::default());
        let files: Vec<_> = walker.walk().collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 0);
    }
}
