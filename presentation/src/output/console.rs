//! Console output formatting for listings and preflight checks

use colored::Colorize;
use redteam_application::ports::log_sink::LineSink;
use redteam_application::{Readiness, ScenarioCheck};
use redteam_domain::{Scenario, ScenarioReport, Tool};
use std::io::{self, Write};

/// Formats catalog listings and reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// `name (N phases)` per scenario
    pub fn format_scenarios(scenarios: &[Scenario]) -> String {
        let mut output = format!("\n{}\n", "Available Scenarios:".cyan().bold());
        if scenarios.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for scenario in scenarios {
            output.push_str(&format!(
                "  {} ({} phases)\n",
                scenario.name,
                scenario.phase_count()
            ));
        }
        output
    }

    /// One line per tool with its install status
    pub fn format_tools<'a>(tools: impl IntoIterator<Item = &'a Tool>) -> String {
        let mut output = format!("\n{}\n", "Available Tools:".cyan().bold());
        for tool in tools {
            let status = if tool.is_installed() {
                "✓".green()
            } else {
                "✗".red()
            };
            output.push_str(&format!("  {:<15} {}", tool.name, status));
            if let Some(category) = &tool.category {
                output.push_str(&format!(" {}", format!("[{}]", category).dimmed()));
            }
            output.push('\n');
        }
        output
    }

    /// Preflight report for `scenario check`
    pub fn format_check(check: &ScenarioCheck) -> String {
        let mut output = format!(
            "\n{} {}\n",
            "Checking scenario:".cyan().bold(),
            check.scenario
        );

        for precheck in &check.prechecks {
            output.push_str(&format!("  {} {}\n", "precheck".dimmed(), precheck));
        }

        for phase in &check.phases {
            let line = match &phase.readiness {
                Readiness::Ready { path } => format!(
                    "  {} Phase {}: {} ({})",
                    "✓".green(),
                    phase.number,
                    phase.tool,
                    path.display()
                ),
                Readiness::NotInstalled { install_hint } => format!(
                    "  {} Phase {}: {} not installed! Visit {}",
                    "✗".red(),
                    phase.number,
                    phase.tool,
                    install_hint
                ),
                Readiness::UnknownTool => format!(
                    "  {} Phase {}: {} not found",
                    "✗".red(),
                    phase.number,
                    phase.tool
                ),
            };
            output.push_str(&line);
            output.push('\n');
        }

        if check.is_ready() {
            output.push_str(&format!("\n{}\n", "All tools available.".green()));
        } else {
            output.push_str(&format!(
                "\n{} {}\n",
                "Missing tools (these phases will be skipped):".yellow(),
                check.missing_tools().join(", ")
            ));
        }
        output
    }

    /// Closing summary of a scenario run
    pub fn format_summary(report: &ScenarioReport) -> String {
        let failed = report.failed();
        let skipped = report.skipped();
        let counts = format!(
            "{} phases: {} succeeded, {} failed, {} skipped",
            report.attempted(),
            report.succeeded(),
            failed,
            skipped
        );
        if failed + skipped == 0 {
            format!("{}\n", counts.green())
        } else {
            format!("{}\n", counts.yellow())
        }
    }

    /// Inline error line, e.g. for a skipped phase
    pub fn error_line(message: &str) -> String {
        format!("{} {}", "[!]".red().bold(), message)
    }
}

/// Writes teed tool output to stdout, one locked write per line.
pub struct ConsoleLineSink;

impl LineSink for ConsoleLineSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().flush()
    }
}
