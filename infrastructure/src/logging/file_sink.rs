//! Plain-text log file writer for teed tool output.
//!
//! Each invocation gets its own file named `<tool>_<YYYYmmdd_HHMMSS>.log`.
//! Two invocations of the same tool within the same second share a name and
//! the later one truncates the earlier file.

use chrono::{DateTime, Local};
use redteam_application::ports::log_sink::{LineSink, LogSinkError, LogSinkFactory, OpenedLog};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Line-oriented log file.
///
/// Thread-safe via `Mutex<BufWriter<File>>`, since stdout and stderr are
/// drained by separate tasks. Every line is flushed as it is written, so the
/// file stays complete even if the orchestrator is killed mid-run.
pub struct FileLogSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileLogSink {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileLogSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log writer poisoned"))?;
        writeln!(writer, "{}", line)?;
        writer.flush()
    }

    fn flush(&self) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log writer poisoned"))?;
        writer.flush()
    }
}

impl Drop for FileLogSink {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// File name for an invocation of `label` started at `started`.
///
/// Path separators in the label are replaced so the file always lands
/// directly inside the log directory.
pub fn log_file_name(label: &str, started: DateTime<Local>) -> String {
    let label: String = label
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}_{}.log", label, started.format("%Y%m%d_%H%M%S"))
}

/// Creates log files inside one directory, creating the directory on demand.
#[derive(Debug, Clone)]
pub struct FileLogSinkFactory {
    dir: PathBuf,
}

impl FileLogSinkFactory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open a log file as if the invocation started at `started`.
    pub fn open_at(
        &self,
        label: &str,
        started: DateTime<Local>,
    ) -> Result<FileLogSink, LogSinkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| LogSinkError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(log_file_name(label, started));
        let sink = FileLogSink::create(&path)
            .map_err(|source| LogSinkError::CreateFile { path, source })?;

        debug!("Opened log file {}", sink.path().display());
        Ok(sink)
    }
}

impl LogSinkFactory for FileLogSinkFactory {
    fn open(&self, label: &str) -> Result<OpenedLog, LogSinkError> {
        let sink = self.open_at(label, Local::now())?;
        let location = sink.path().to_path_buf();
        Ok(OpenedLog {
            sink: Arc::new(sink),
            location,
        })
    }
}
