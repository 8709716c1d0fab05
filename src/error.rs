//! Process exit codes.

/// Exit codes reported to the shell.
///
/// - 0: Scan completed and duplicates were found.
/// - 1: Fatal error (bad location, comparison I/O failure).
/// - 2: Scan completed but no duplicates were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: scan completed and duplicates were found.
    Success = 0,
    /// General error: the run was aborted.
    GeneralError = 1,
    /// No duplicates: scan completed but found nothing to report.
    NoDuplicates = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
