//! Process runner port
//!
//! Defines the interface for launching one external tool and teeing its
//! output until it has exited.

use super::log_sink::LineSink;
use async_trait::async_trait;
use redteam_domain::ExitReport;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// A fully resolved invocation: executable, arguments and limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Tool name, used for diagnostics
    pub label: String,
    /// Resolved executable
    pub program: PathBuf,
    /// Arguments after substitution and tokenization
    pub args: Vec<String>,
    /// Kill the process if it is still running after this long
    pub timeout: Option<Duration>,
}

impl LaunchRequest {
    pub fn new(label: impl Into<String>, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Program and arguments joined for display
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Errors that prevent a process from being run at all
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to capture {0} of child process")]
    MissingPipe(&'static str),

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Port for process execution
///
/// Implementations spawn the process, drain stdout and stderr concurrently
/// into the console and the optional log sink, and return only after the
/// process has exited and both streams are fully drained.
#[async_trait]
pub trait ProcessRunnerPort: Send + Sync {
    async fn run(
        &self,
        request: &LaunchRequest,
        log: Option<Arc<dyn LineSink>>,
    ) -> Result<ExitReport, LaunchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let request = LaunchRequest::new(
            "nmap",
            "/usr/bin/nmap",
            vec!["-sV".to_string(), "10.0.0.5".to_string()],
        );
        assert_eq!(request.command_line(), "/usr/bin/nmap -sV 10.0.0.5");
        assert!(request.timeout.is_none());
    }
}
