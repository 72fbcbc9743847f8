//! Progress notification port
//!
//! Defines the interface for reporting progress while tools and scenarios
//! run.

use super::log_sink::LogSinkError;
use redteam_domain::{Phase, PhaseOutcome, Scenario, ScenarioReport, Tool};
use std::path::Path;

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer. Phase numbers are
/// 1-based.
pub trait RunProgressNotifier: Send + Sync {
    /// Called once before the first phase of a scenario
    fn on_scenario_start(&self, _scenario: &Scenario) {}

    /// Called before each phase, whatever happened to the previous one
    fn on_phase_start(&self, number: usize, total: usize, phase: &Phase);

    /// Called right before the process is spawned
    fn on_launch(&self, _tool: &Tool, _args: &[String]) {}

    /// Called when the invocation's log file has been created
    fn on_log_opened(&self, _location: &Path) {}

    /// Called when the invocation runs without a log file
    fn on_log_unavailable(&self, _tool: &str, _error: &LogSinkError) {}

    /// Called after each phase with its outcome
    fn on_phase_complete(&self, number: usize, total: usize, outcome: &PhaseOutcome);

    /// Called once after every phase has been attempted
    fn on_scenario_complete(&self, report: &ScenarioReport);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl RunProgressNotifier for NoProgress {
    fn on_phase_start(&self, _number: usize, _total: usize, _phase: &Phase) {}
    fn on_phase_complete(&self, _number: usize, _total: usize, _outcome: &PhaseOutcome) {}
    fn on_scenario_complete(&self, _report: &ScenarioReport) {}
}
