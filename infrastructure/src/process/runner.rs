//! Tokio-based process runner.
//!
//! Spawns a tool with both output streams piped, drains them concurrently
//! through [`drain_lines`], and only reports back once the process has exited
//! and both drains have reached end of stream. A timeout or cancellation
//! kills the process but still waits for the drains, so output written
//! before the kill is never lost.

use super::tee::{StreamKind, drain_lines};
use async_trait::async_trait;
use redteam_application::ports::log_sink::LineSink;
use redteam_application::ports::process_runner::{LaunchError, LaunchRequest, ProcessRunnerPort};
use redteam_domain::{ExitReport, Termination};
use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What ended the wait on a running child
enum Wake {
    Exited(io::Result<ExitStatus>),
    TimedOut,
    Cancelled,
}

/// Runs tools as child processes, teeing output to the console and a log.
pub struct TokioProcessRunner {
    console: Arc<dyn LineSink>,
    cancel: CancellationToken,
}

impl TokioProcessRunner {
    pub fn new(console: Arc<dyn LineSink>) -> Self {
        Self {
            console,
            cancel: CancellationToken::new(),
        }
    }

    /// Kill the running child when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn command(request: &LaunchRequest) -> Command {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: have the kernel signal the tool if the orchestrator dies
        // without running Drop (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }

    async fn wait(&self, child: &mut Child, timeout: Option<Duration>) -> Wake {
        let deadline = async move {
            match timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            status = child.wait() => Wake::Exited(status),
            _ = deadline => Wake::TimedOut,
            _ = self.cancel.cancelled() => Wake::Cancelled,
        }
    }

    async fn terminate(child: &mut Child) -> io::Result<ExitStatus> {
        // Fails only if the child has already been reaped; wait() still
        // returns its status.
        if let Err(e) = child.start_kill() {
            debug!("Kill request failed: {}", e);
        }
        child.wait().await
    }

    async fn join_drain(handle: JoinHandle<usize>, kind: StreamKind) -> usize {
        match handle.await {
            Ok(count) => count,
            Err(e) => {
                warn!("{} drain task failed: {}", kind, e);
                0
            }
        }
    }
}

#[async_trait]
impl ProcessRunnerPort for TokioProcessRunner {
    async fn run(
        &self,
        request: &LaunchRequest,
        log: Option<Arc<dyn LineSink>>,
    ) -> Result<ExitReport, LaunchError> {
        let program = request.program.display().to_string();

        let mut child = Self::command(request)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        debug!("Spawned {} (pid {:?})", request.label, child.id());

        let stdout = child
            .stdout
            .take()
            .ok_or(LaunchError::MissingPipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(LaunchError::MissingPipe("stderr"))?;

        let out_drain = tokio::spawn(drain_lines(
            stdout,
            StreamKind::Stdout,
            self.console.clone(),
            log.clone(),
        ));
        let err_drain = tokio::spawn(drain_lines(
            stderr,
            StreamKind::Stderr,
            self.console.clone(),
            log,
        ));

        let (status, termination) = match self.wait(&mut child, request.timeout).await {
            Wake::Exited(status) => (status, Termination::Exited),
            Wake::TimedOut => {
                warn!(
                    "{} still running after {:?}, killing it",
                    request.label,
                    request.timeout.unwrap_or_default()
                );
                (Self::terminate(&mut child).await, Termination::TimedOut)
            }
            Wake::Cancelled => {
                info!("Cancelling {}", request.label);
                (Self::terminate(&mut child).await, Termination::Cancelled)
            }
        };

        let (stdout_lines, stderr_lines) = tokio::join!(
            Self::join_drain(out_drain, StreamKind::Stdout),
            Self::join_drain(err_drain, StreamKind::Stderr)
        );

        let status = status.map_err(|source| LaunchError::Wait { program, source })?;
        debug!(
            "{} {} after {} stdout / {} stderr lines",
            request.label,
            termination.as_str(),
            stdout_lines,
            stderr_lines
        );

        Ok(ExitReport::exited(status.code())
            .with_termination(termination)
            .with_line_counts(stdout_lines, stderr_lines))
    }
}
