//! Execution parameters: per-invocation limits.
//!
//! [`ExecutionParams`] groups the static parameters that control how
//! [`ExecutePhaseUseCase`](crate::use_cases::execute_phase::ExecutePhaseUseCase)
//! launches each tool.

use std::time::Duration;

/// Per-invocation execution limits.
///
/// The default has no timeout: a tool that never exits keeps the run waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionParams {
    /// Kill a tool that is still running after this long.
    pub timeout: Option<Duration>,
}

impl ExecutionParams {
    /// Creates parameters from an optional timeout in seconds.
    ///
    /// `None` and `Some(0)` both mean no timeout.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.filter(|s| *s > 0).map(Duration::from_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
