//! Command-line interface definitions for dfind.
//!
//! # Example
//!
//! ```bash
//! # Check the top level of a directory
//! dfind ~/Downloads
//!
//! # Recurse into subfolders, images only, with a trailing summary
//! dfind -r -e jpg -e png -v ~/Pictures
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find duplicate files by content, not name.
///
/// dfind groups the files under PATH by exact byte length, rejects
/// same-size files whose first or last 16 KiB differ, and confirms the
/// rest with a full BLAKE3 content digest. Each duplicate path is printed
/// on its own line; the earliest copy in a group is never reported.
#[derive(Debug, Parser)]
#[command(name = "dfind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to check for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Recursively search subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Only consider files with this extension (repeatable, e.g. -e jpg -e png)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Increase log verbosity and print a trailing summary line
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress everything except errors and the report itself
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Maximum number of size groups compared in parallel
    #[arg(long, value_name = "N", default_value = "10")]
    pub threads: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["dfind"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dfind", "/tmp"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("/tmp"));
        assert!(!cli.recursive);
        assert!(cli.extensions.is_empty());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.threads, 10);
    }

    #[test]
    fn test_repeated_extensions() {
        let cli = Cli::try_parse_from(["dfind", "-e", "jpg", "-e", "png", "/tmp"]).unwrap();
        assert_eq!(cli.extensions, vec!["jpg".to_string(), "png".to_string()]);
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["dfind", "-vv", "/tmp"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dfind", "-q", "-v", "/tmp"]).is_err());
    }

    #[test]
    fn test_trailing_path_with_flags() {
        let cli = Cli::try_parse_from(["dfind", "-r", "--threads", "4", "/data"]).unwrap();
        assert!(cli.recursive);
        assert_eq!(cli.threads, 4);
        assert_eq!(cli.path, PathBuf::from("/data"));
    }
}
