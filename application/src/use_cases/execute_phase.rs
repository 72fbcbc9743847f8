//! Execute Phase use case
//!
//! Runs one tool reference with an argument template: resolve the tool,
//! check it is installed, substitute the run context, open a log sink and
//! hand the invocation to the process runner.
//!
//! Every problem is turned into a [`PhaseOutcome`] rather than an error, so
//! a scenario can always move on to its next phase.

use crate::config::ExecutionParams;
use crate::ports::log_sink::LogSinkFactory;
use crate::ports::process_runner::{LaunchRequest, ProcessRunnerPort};
use crate::ports::progress::RunProgressNotifier;
use redteam_domain::{Catalog, PhaseOutcome, RunContext};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for executing a single tool invocation
pub struct ExecutePhaseUseCase<R: ProcessRunnerPort + ?Sized> {
    catalog: Arc<Catalog>,
    runner: Arc<R>,
    log_sinks: Arc<dyn LogSinkFactory>,
    params: ExecutionParams,
}

impl<R: ProcessRunnerPort + ?Sized> ExecutePhaseUseCase<R> {
    pub fn new(catalog: Arc<Catalog>, runner: Arc<R>, log_sinks: Arc<dyn LogSinkFactory>) -> Self {
        Self {
            catalog,
            runner,
            log_sinks,
            params: ExecutionParams::default(),
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run `tool_ref` with `args_template` materialized against `ctx`.
    pub async fn execute(
        &self,
        tool_ref: &str,
        args_template: &str,
        ctx: &RunContext,
        progress: &dyn RunProgressNotifier,
    ) -> PhaseOutcome {
        let Some(tool) = self.catalog.tool(tool_ref) else {
            warn!("Tool {} not found", tool_ref);
            return PhaseOutcome::ToolNotFound {
                tool: tool_ref.to_string(),
            };
        };

        let Some(program) = tool.path() else {
            warn!("Tool {} not installed", tool.name);
            return PhaseOutcome::ToolNotInstalled {
                tool: tool.name.clone(),
                install_hint: tool.install.clone(),
            };
        };

        let args = ctx.materialize(args_template);

        // The sink lives until the end of this call; the runner's clones are
        // dropped once both drains have finished.
        let log = match self.log_sinks.open(&tool.name) {
            Ok(opened) => {
                debug!("Logging {} to {}", tool.name, opened.location.display());
                progress.on_log_opened(&opened.location);
                Some(opened.sink)
            }
            Err(e) => {
                warn!("Running {} without a log file: {}", tool.name, e);
                progress.on_log_unavailable(&tool.name, &e);
                None
            }
        };

        let request =
            LaunchRequest::new(tool.name.clone(), program, args).with_timeout(self.params.timeout);

        info!("Executing: {}", request.command_line());
        progress.on_launch(tool, &request.args);

        let outcome = match self.runner.run(&request, log.clone()).await {
            Ok(exit) => {
                if exit.is_success() {
                    info!("{} finished ({} lines)", tool.name, exit.total_lines());
                } else {
                    warn!("Command {} failed: {}", tool.name, exit);
                }
                PhaseOutcome::Completed {
                    tool: tool.name.clone(),
                    exit,
                }
            }
            Err(e) => {
                warn!("Error starting command: {}", e);
                PhaseOutcome::LaunchFailed {
                    tool: tool.name.clone(),
                    error: e.to_string(),
                }
            }
        };

        if let Some(log) = log {
            if let Err(e) = log.flush() {
                warn!("Failed to flush log for {}: {}", tool.name, e);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::log_sink::NoLogSinks;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{
        BrokenSinks, MemorySinks, MockRunner, RecordingProgress, sample_catalog,
    };
    use std::path::PathBuf;
    use std::time::Duration;

    fn use_case(
        runner: Arc<MockRunner>,
        sinks: Arc<dyn LogSinkFactory>,
    ) -> ExecutePhaseUseCase<MockRunner> {
        ExecutePhaseUseCase::new(sample_catalog(vec![]), runner, sinks)
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_not_launched() {
        let runner = Arc::new(MockRunner::new());
        let sinks = Arc::new(MemorySinks::default());
        let outcome = use_case(runner.clone(), sinks.clone())
            .execute("ghost", "{target}", &RunContext::default(), &NoProgress)
            .await;

        assert_eq!(
            outcome,
            PhaseOutcome::ToolNotFound {
                tool: "ghost".to_string()
            }
        );
        assert!(runner.launched_labels().is_empty());
        assert!(sinks.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uninstalled_tool_is_never_spawned() {
        let runner = Arc::new(MockRunner::new());
        let outcome = use_case(runner.clone(), Arc::new(NoLogSinks))
            .execute("MSF", "", &RunContext::default(), &NoProgress)
            .await;

        assert!(runner.launched_labels().is_empty());
        assert!(outcome.is_skipped());
        assert!(
            outcome
                .to_string()
                .contains("https://github.com/rapid7/metasploit-framework")
        );
    }

    #[tokio::test]
    async fn test_substitutes_and_tokenizes_arguments() {
        let runner = Arc::new(MockRunner::new());
        let ctx = RunContext::new("10.0.0.5", "smb");
        let outcome = use_case(runner.clone(), Arc::new(NoLogSinks))
            .execute("nmap", "-p 445  {target} --script {module}", &ctx, &NoProgress)
            .await;

        assert!(outcome.is_success());
        let launches = runner.launches.lock().unwrap();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].label, "Nmap");
        assert_eq!(launches[0].program, PathBuf::from("/usr/bin/nmap"));
        assert_eq!(
            launches[0].args,
            vec!["-p", "445", "10.0.0.5", "--script", "smb"]
        );
    }

    #[tokio::test]
    async fn test_empty_template_means_no_arguments() {
        let runner = Arc::new(MockRunner::new());
        use_case(runner.clone(), Arc::new(NoLogSinks))
            .execute("echo-tool", "", &RunContext::new("host", ""), &NoProgress)
            .await;

        assert!(runner.launches.lock().unwrap()[0].args.is_empty());
    }

    #[tokio::test]
    async fn test_log_sink_is_opened_before_launch_and_flushed() {
        let runner = Arc::new(MockRunner::new());
        let sinks = Arc::new(MemorySinks::default());
        let progress = RecordingProgress::default();
        use_case(runner.clone(), sinks.clone())
            .execute("echo-tool", "hi", &RunContext::default(), &progress)
            .await;

        assert_eq!(*sinks.opened.lock().unwrap(), vec!["echo-tool"]);
        assert_eq!(
            *sinks.sink.lines.lock().unwrap(),
            vec!["ran /bin/echo hi".to_string()]
        );
        assert_eq!(*sinks.sink.flushes.lock().unwrap(), 1);
        assert_eq!(
            progress.events(),
            vec!["log mem/echo-tool.log", "launch echo-tool hi"]
        );
    }

    #[tokio::test]
    async fn test_unavailable_log_sink_still_runs_tool() {
        let runner = Arc::new(MockRunner::new());
        let progress = RecordingProgress::default();
        let outcome = use_case(runner.clone(), Arc::new(BrokenSinks))
            .execute("echo-tool", "", &RunContext::default(), &progress)
            .await;

        assert!(outcome.is_success());
        assert_eq!(runner.launched_labels(), vec!["echo-tool"]);
        assert_eq!(progress.events()[0], "no-log echo-tool");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_completed_not_success() {
        let runner = Arc::new(MockRunner::new().with_exit_code("Nmap", 2));
        let outcome = use_case(runner, Arc::new(NoLogSinks))
            .execute("nmap", "", &RunContext::default(), &NoProgress)
            .await;

        assert!(!outcome.is_success());
        assert!(!outcome.is_skipped());
        assert_eq!(outcome.exit().unwrap().code, Some(2));
    }

    #[tokio::test]
    async fn test_launch_failure_becomes_outcome() {
        let runner = Arc::new(MockRunner::new().failing_spawn("Nmap"));
        let outcome = use_case(runner, Arc::new(NoLogSinks))
            .execute("nmap", "", &RunContext::default(), &NoProgress)
            .await;

        match outcome {
            PhaseOutcome::LaunchFailed { tool, error } => {
                assert_eq!(tool, "Nmap");
                assert!(error.contains("No such file or directory"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_passed_to_runner() {
        let runner = Arc::new(MockRunner::new());
        use_case(runner.clone(), Arc::new(NoLogSinks))
            .with_params(ExecutionParams::default().with_timeout(Duration::from_secs(5)))
            .execute("nmap", "", &RunContext::default(), &NoProgress)
            .await;

        assert_eq!(
            runner.launches.lock().unwrap()[0].timeout,
            Some(Duration::from_secs(5))
        );
    }
}
