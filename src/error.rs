//! Process exit codes.

/// Exit codes for the imagededup application.
///
/// - 0: completed normally, duplicates found
/// - 1: unexpected failure
/// - 2: completed normally, no duplicates found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed and duplicate groups were found.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Scan completed but no duplicates were found.
    NoDuplicates = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
