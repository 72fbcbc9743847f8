//! Per-invocation log files.
//!
//! Provides [`FileLogSinkFactory`], which implements the
//! [`LogSinkFactory`](redteam_application::LogSinkFactory) port by creating
//! one timestamped file per tool invocation.

mod file_sink;

pub use file_sink::{FileLogSink, FileLogSinkFactory, log_file_name};
