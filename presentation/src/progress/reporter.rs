//! Progress reporting for tool and scenario runs
//!
//! Banners and status lines go to stdout between the teed tool output;
//! `[!]` failure lines go to stderr.

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use redteam_application::ports::log_sink::LogSinkError;
use redteam_application::ports::progress::RunProgressNotifier;
use redteam_domain::{Phase, PhaseOutcome, Scenario, ScenarioReport, Tool};
use std::path::Path;

/// Plain console progress: phase banners, launch lines, inline failures.
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    pub fn new() -> Self {
        Self
    }

    pub fn scenario_banner(scenario: &Scenario) -> String {
        format!("\n{} {}", "Running scenario:".bold(), scenario.name)
    }

    pub fn phase_banner(number: usize, total: usize) -> String {
        format!("\n{}", format!("=== Phase {}/{} ===", number, total).cyan().bold())
    }

    pub fn launch_line(tool: &Tool, args: &[String]) -> String {
        let program = tool
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| tool.name.clone());
        if args.is_empty() {
            format!("Executing: {}", program)
        } else {
            format!("Executing: {} {}", program, args.join(" "))
        }
    }

    /// Line for a finished phase: `None` on success, an error line otherwise.
    pub fn outcome_line(outcome: &PhaseOutcome) -> Option<String> {
        if outcome.is_success() {
            None
        } else {
            Some(ConsoleFormatter::error_line(&outcome.to_string()))
        }
    }
}

impl RunProgressNotifier for ConsoleProgress {
    fn on_scenario_start(&self, scenario: &Scenario) {
        println!("{}", Self::scenario_banner(scenario));
    }

    fn on_phase_start(&self, number: usize, total: usize, _phase: &Phase) {
        println!("{}", Self::phase_banner(number, total));
    }

    fn on_launch(&self, tool: &Tool, args: &[String]) {
        println!("{}", Self::launch_line(tool, args));
    }

    fn on_log_opened(&self, location: &Path) {
        println!("{}", format!("Logging to {}", location.display()).dimmed());
    }

    fn on_log_unavailable(&self, tool: &str, error: &LogSinkError) {
        eprintln!(
            "{}",
            ConsoleFormatter::error_line(&format!("No log file for {}: {}", tool, error))
        );
    }

    fn on_phase_complete(&self, _number: usize, _total: usize, outcome: &PhaseOutcome) {
        if let Some(line) = Self::outcome_line(outcome) {
            eprintln!("{}", line);
        }
    }

    fn on_scenario_complete(&self, report: &ScenarioReport) {
        println!("\n{}", "Scenario complete!".green().bold());
        print!("{}", ConsoleFormatter::format_summary(report));
    }
}
