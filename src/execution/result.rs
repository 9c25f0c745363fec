//! Execution result types.

use std::time::Duration;

/// Output of a successful tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Standard output exactly as produced (lossy UTF-8).
    pub stdout: String,
    /// Wall time from spawn to exit.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(stdout: String, duration: Duration) -> Self {
        Self { stdout, duration }
    }

    /// Decode raw stdout bytes.
    pub fn from_bytes(stdout: &[u8], duration: Duration) -> Self {
        Self::new(String::from_utf8_lossy(stdout).into_owned(), duration)
    }

    /// Consume the result, keeping only stdout.
    pub fn into_stdout(self) -> String {
        self.stdout
    }
}
