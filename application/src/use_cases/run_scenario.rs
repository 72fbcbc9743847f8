//! Run Scenario use case
//!
//! Walks a scenario's phases strictly in declared order. A phase that fails
//! in any way (unknown tool, missing tool, launch error, non-zero exit) is
//! reported and the next phase runs anyway. Only an unknown scenario name,
//! or cancellation of the whole run, ends the use case with an error.

use crate::ports::process_runner::ProcessRunnerPort;
use crate::ports::progress::{NoProgress, RunProgressNotifier};
use crate::use_cases::execute_phase::ExecutePhaseUseCase;
use redteam_domain::{RunContext, ScenarioReport};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that end a scenario run
#[derive(Error, Debug)]
pub enum RunScenarioError {
    #[error("Scenario {0} not found")]
    NotFound(String),

    #[error("Scenario {scenario} cancelled after {attempted} of {total} phases")]
    Cancelled {
        scenario: String,
        attempted: usize,
        total: usize,
    },
}

/// Use case for running a scenario
pub struct RunScenarioUseCase<R: ProcessRunnerPort + ?Sized> {
    phases: ExecutePhaseUseCase<R>,
    cancel: CancellationToken,
}

impl<R: ProcessRunnerPort + ?Sized> RunScenarioUseCase<R> {
    pub fn new(phases: ExecutePhaseUseCase<R>) -> Self {
        Self {
            phases,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop once `cancel` fires: no further phase starts and the run is
    /// reported as cancelled, even when the phase in flight was the last.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        name: &str,
        ctx: &RunContext,
    ) -> Result<ScenarioReport, RunScenarioError> {
        self.execute_with_progress(name, ctx, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        name: &str,
        ctx: &RunContext,
        progress: &dyn RunProgressNotifier,
    ) -> Result<ScenarioReport, RunScenarioError> {
        let scenario = self
            .phases
            .catalog()
            .scenario(name)
            .ok_or_else(|| RunScenarioError::NotFound(name.to_string()))?;

        let total = scenario.phases.len();
        info!("Running scenario {} ({} phases)", scenario.name, total);
        progress.on_scenario_start(scenario);

        let mut report = ScenarioReport::new(scenario.name.clone());

        for (index, phase) in scenario.phases.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("Scenario {} cancelled before phase {}", scenario.name, index + 1);
                return Err(RunScenarioError::Cancelled {
                    scenario: scenario.name.clone(),
                    attempted: report.attempted(),
                    total,
                });
            }

            let number = index + 1;
            info!("Phase {}/{}: {}", number, total, phase.tool);
            progress.on_phase_start(number, total, phase);

            let outcome = self
                .phases
                .execute(&phase.tool, &phase.args, ctx, progress)
                .await;

            progress.on_phase_complete(number, total, &outcome);
            report.push(outcome);

            if self.cancel.is_cancelled() {
                warn!("Scenario {} cancelled during phase {}", scenario.name, number);
                return Err(RunScenarioError::Cancelled {
                    scenario: scenario.name.clone(),
                    attempted: report.attempted(),
                    total,
                });
            }
        }

        info!(
            "Scenario {} complete: {} succeeded, {} failed, {} skipped",
            report.scenario,
            report.succeeded(),
            report.failed(),
            report.skipped()
        );
        progress.on_scenario_complete(&report);

        Ok(report)
    }
}
