//! dfind - content-based duplicate file finder
//!
//! Finds files that are byte-identical within a directory tree by grouping
//! candidates by exact size, rejecting same-size non-duplicates from their
//! boundary bytes, and confirming the survivors with a full BLAKE3 content
//! digest.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod scanner;

use cli::Cli;
use duplicates::{DuplicateFinder, FinderConfig};
use error::ExitCode;
use scanner::WalkerConfig;

/// Run the application with parsed CLI arguments.
///
/// Prints the duplicate report to stdout, one quoted absolute path per
/// line, in no guaranteed order. Errors bubble up to `main`, which reports
/// them on stderr and exits non-zero; nothing is printed before a fatal
/// error.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let walker_config = WalkerConfig::new(cli.recursive, cli.extensions.clone());
    let finder_config = FinderConfig::default().with_threads(cli.threads);
    let finder = DuplicateFinder::new(walker_config, finder_config);

    let (duplicates, summary) = finder.find_duplicates(&cli.path)?;

    for duplicate in &duplicates {
        println!("\"{}\"", duplicate.path.display());
    }
    if cli.verbose > 0 {
        println!("found {} duplicates", summary.duplicate_files);
    }

    log::debug!(
        "{} files in {} size groups ({} eligible), {} comparisons, {} digest confirmations",
        summary.total_files,
        summary.size_groups,
        summary.eligible_groups,
        summary.comparisons,
        summary.digest_confirmations
    );

    Ok(if duplicates.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    })
}
