//! Ports for line-oriented output targets.
//!
//! A [`LineSink`] receives the lines teed from a running tool. The console is
//! one sink; the per-invocation log file is another, obtained from a
//! [`LogSinkFactory`] right before the tool is launched.
//!
//! Log sinks are best-effort: a factory that cannot create a file returns a
//! [`LogSinkError`] and the invocation continues with console output only.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// An append-only, line-oriented write target.
///
/// Implementations must serialise concurrent calls: stdout and stderr of the
/// same process are drained by two tasks writing to the same sink.
pub trait LineSink: Send + Sync {
    /// Append one line. The sink adds the line terminator.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Push buffered lines to the underlying target.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Errors raised while opening a log sink
#[derive(Error, Debug)]
pub enum LogSinkError {
    #[error("could not create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not create log file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log files are disabled")]
    Disabled,
}

/// A freshly created log sink and where it writes to
pub struct OpenedLog {
    pub sink: Arc<dyn LineSink>,
    pub location: PathBuf,
}

/// Port for creating one log sink per tool invocation.
pub trait LogSinkFactory: Send + Sync {
    /// Open a new sink for an invocation of the tool named `label`.
    fn open(&self, label: &str) -> Result<OpenedLog, LogSinkError>;
}

/// Factory that never produces a sink, for tests and console-only runs.
pub struct NoLogSinks;

impl LogSinkFactory for NoLogSinks {
    fn open(&self, _label: &str) -> Result<OpenedLog, LogSinkError> {
        Err(LogSinkError::Disabled)
    }
}
