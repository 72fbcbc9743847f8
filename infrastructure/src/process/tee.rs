//! Line-by-line draining of one child output stream.
//!
//! Each stream is owned by exactly one drain task. Lines are written to the
//! console first and then to the optional log sink; both sinks serialise
//! their own writes, so the two drains of one process never share anything
//! else.

use redteam_application::ports::log_sink::LineSink;
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Stdout => write!(f, "stdout"),
            StreamKind::Stderr => write!(f, "stderr"),
        }
    }
}

/// Read `reader` to end of stream, teeing every line. Returns the line count.
///
/// Invalid UTF-8 is replaced rather than dropped, and a final line without a
/// terminator is still emitted. A read error ends the drain as if the stream
/// had closed. Sink write errors are reported once and otherwise ignored so
/// the child is never left blocked on a full pipe.
pub async fn drain_lines<R>(
    reader: R,
    kind: StreamKind,
    console: Arc<dyn LineSink>,
    log: Option<Arc<dyn LineSink>>,
) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut count = 0;
    let mut console_failed = false;
    let mut log_failed = false;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Error reading {}: {}", kind, e);
                break;
            }
        }

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        count += 1;
        trace!("{} | {}", kind, line);

        if let Err(e) = console.write_line(&line) {
            if !console_failed {
                warn!("Failed to write {} to console: {}", kind, e);
                console_failed = true;
            }
        }

        if let Some(log) = &log {
            if let Err(e) = log.write_line(&line) {
                if !log_failed {
                    warn!("Failed to write {} to log file: {}", kind, e);
                    log_failed = true;
                }
            }
        }
    }

    count
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl LineSink for Collect {
        fn write_line(&self, line: &str) -> io::Result<()> {
            self.0.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }

    struct Refuse;

    impl LineSink for Refuse {
        fn write_line(&self, _line: &str) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    #[tokio::test]
    async fn test_drains_lines_to_both_sinks() {
        let console = Arc::new(Collect::default());
        let log = Arc::new(Collect::default());
        let input: &[u8] = b"one\r\ntwo\n\nlast without newline";

        let count =
            drain_lines(input, StreamKind::Stdout, console.clone(), Some(log.clone())).await;

        let expected = vec!["one", "two", "", "last without newline"];
        assert_eq!(count, 4);
        assert_eq!(*console.0.lock().unwrap(), expected);
        assert_eq!(*log.0.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let console = Arc::new(Collect::default());
        let input: &[u8] = b"ok \xff\xfe bytes\n";
        let count = drain_lines(input, StreamKind::Stderr, console.clone(), None).await;

        assert_eq!(count, 1);
        assert_eq!(console.0.lock().unwrap()[0], "ok \u{fffd}\u{fffd} bytes");
    }

    #[tokio::test]
    async fn test_failing_log_does_not_stop_drain() {
        let console = Arc::new(Collect::default());
        let input: &[u8] = b"a\nb\nc\n";
        let count = drain_lines(
            input,
            StreamKind::Stdout,
            console.clone(),
            Some(Arc::new(Refuse)),
        )
        .await;

        assert_eq!(count, 3);
        assert_eq!(console.0.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let input: &[u8] = b"";
        let count =
            drain_lines(input, StreamKind::Stdout, Arc::new(Collect::default()), None).await;
        assert_eq!(count, 0);
    }
}
