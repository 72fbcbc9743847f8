//! Run Tool use case
//!
//! Runs one catalog tool with its own argument template. Unlike a scenario
//! phase, every failure to get the process started is fatal here: the user
//! asked for exactly this tool.

use crate::ports::process_runner::ProcessRunnerPort;
use crate::ports::progress::{NoProgress, RunProgressNotifier};
use crate::use_cases::execute_phase::ExecutePhaseUseCase;
use redteam_domain::{PhaseOutcome, RunContext};
use thiserror::Error;

/// Errors that prevent a standalone tool run
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunToolError {
    #[error("Tool {0} not found")]
    NotFound(String),

    #[error("Tool {tool} not installed! Visit {install_hint}")]
    NotInstalled { tool: String, install_hint: String },

    #[error("Error starting {tool}: {error}")]
    Launch { tool: String, error: String },
}

/// Use case for running a single tool outside any scenario
pub struct RunToolUseCase<R: ProcessRunnerPort + ?Sized> {
    phases: ExecutePhaseUseCase<R>,
}

impl<R: ProcessRunnerPort + ?Sized> RunToolUseCase<R> {
    pub fn new(phases: ExecutePhaseUseCase<R>) -> Self {
        Self { phases }
    }

    pub async fn execute(
        &self,
        name: &str,
        ctx: &RunContext,
    ) -> Result<PhaseOutcome, RunToolError> {
        self.execute_with_progress(name, ctx, &NoProgress).await
    }

    /// Run the tool; a non-zero exit is returned as a completed outcome.
    pub async fn execute_with_progress(
        &self,
        name: &str,
        ctx: &RunContext,
        progress: &dyn RunProgressNotifier,
    ) -> Result<PhaseOutcome, RunToolError> {
        let template = self
            .phases
            .catalog()
            .tool(name)
            .map(|tool| tool.args.clone())
            .ok_or_else(|| RunToolError::NotFound(name.to_string()))?;

        match self.phases.execute(name, &template, ctx, progress).await {
            PhaseOutcome::ToolNotFound { tool } => Err(RunToolError::NotFound(tool)),
            PhaseOutcome::ToolNotInstalled { tool, install_hint } => {
                Err(RunToolError::NotInstalled { tool, install_hint })
            }
            PhaseOutcome::LaunchFailed { tool, error } => Err(RunToolError::Launch { tool, error }),
            completed => Ok(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::log_sink::NoLogSinks;
    use crate::use_cases::test_support::{MockRunner, sample_catalog};
    use std::sync::Arc;

    fn run_tool(runner: Arc<MockRunner>) -> RunToolUseCase<MockRunner> {
        RunToolUseCase::new(ExecutePhaseUseCase::new(
            sample_catalog(vec![]),
            runner,
            Arc::new(NoLogSinks),
        ))
    }

    #[tokio::test]
    async fn test_uses_tool_template() {
        let runner = Arc::new(MockRunner::new());
        let outcome = run_tool(runner.clone())
            .execute("NMAP", &RunContext::new("10.0.0.5", ""))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            runner.launches.lock().unwrap()[0].args,
            vec!["-sV", "10.0.0.5"]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error() {
        let runner = Arc::new(MockRunner::new());
        let result = run_tool(runner.clone())
            .execute("ghost", &RunContext::default())
            .await;
        assert_eq!(result, Err(RunToolError::NotFound("ghost".to_string())));
        assert!(runner.launched_labels().is_empty());
    }

    #[tokio::test]
    async fn test_uninstalled_tool_is_error_with_hint() {
        let runner = Arc::new(MockRunner::new());
        let err = run_tool(runner.clone())
            .execute("msf", &RunContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("rapid7/metasploit-framework"));
        assert!(runner.launched_labels().is_empty());
    }

    #[tokio::test]
    async fn test_launch_failure_is_error() {
        let runner = Arc::new(MockRunner::new().failing_spawn("echo-tool"));
        let err = run_tool(runner)
            .execute("echo-tool", &RunContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RunToolError::Launch { .. }));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let runner = Arc::new(MockRunner::new().with_exit_code("echo-tool", 7));
        let outcome = run_tool(runner)
            .execute("echo-tool", &RunContext::default())
            .await
            .unwrap();
        assert_eq!(outcome.exit().unwrap().code, Some(7));
    }
}
