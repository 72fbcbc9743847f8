//! Outcomes of tool invocations and scenario runs (Value Objects)

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a launched process came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The process exited on its own
    Exited,
    /// The process was killed after the configured timeout elapsed
    TimedOut,
    /// The process was killed because the run was cancelled
    Cancelled,
}

impl Termination {
    pub fn as_str(&self) -> &str {
        match self {
            Termination::Exited => "exited",
            Termination::TimedOut => "timed out",
            Termination::Cancelled => "cancelled",
        }
    }
}

/// Result of one fully drained process invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitReport {
    /// Exit code, or `None` when the process was ended by a signal
    pub code: Option<i32>,
    pub termination: Termination,
    /// Lines read from stdout
    pub stdout_lines: usize,
    /// Lines read from stderr
    pub stderr_lines: usize,
}

impl ExitReport {
    pub fn exited(code: Option<i32>) -> Self {
        Self {
            code,
            termination: Termination::Exited,
            stdout_lines: 0,
            stderr_lines: 0,
        }
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_line_counts(mut self, stdout_lines: usize, stderr_lines: usize) -> Self {
        self.stdout_lines = stdout_lines;
        self.stderr_lines = stderr_lines;
        self
    }

    pub fn is_success(&self) -> bool {
        self.termination == Termination::Exited && self.code == Some(0)
    }

    pub fn total_lines(&self) -> usize {
        self.stdout_lines + self.stderr_lines
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.termination, self.code) {
            (Termination::Exited, Some(code)) => write!(f, "exit status {}", code),
            (Termination::Exited, None) => write!(f, "terminated by signal"),
            (other, _) => write!(f, "{}", other.as_str()),
        }
    }
}

/// What happened when a single phase (or standalone tool) was executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// The process ran to completion, successfully or not
    Completed { tool: String, exit: ExitReport },
    /// No tool with this name exists in the catalog
    ToolNotFound { tool: String },
    /// The tool exists but none of its probes resolved
    ToolNotInstalled { tool: String, install_hint: String },
    /// The process could not be started
    LaunchFailed { tool: String, error: String },
}

impl PhaseOutcome {
    pub fn tool(&self) -> &str {
        match self {
            PhaseOutcome::Completed { tool, .. }
            | PhaseOutcome::ToolNotFound { tool }
            | PhaseOutcome::ToolNotInstalled { tool, .. }
            | PhaseOutcome::LaunchFailed { tool, .. } => tool,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PhaseOutcome::Completed { exit, .. } if exit.is_success())
    }

    /// The phase never got as far as starting a process
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            PhaseOutcome::ToolNotFound { .. } | PhaseOutcome::ToolNotInstalled { .. }
        )
    }

    pub fn exit(&self) -> Option<&ExitReport> {
        match self {
            PhaseOutcome::Completed { exit, .. } => Some(exit),
            _ => None,
        }
    }
}

impl fmt::Display for PhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseOutcome::Completed { tool, exit } if exit.is_success() => {
                write!(f, "Tool {} finished", tool)
            }
            PhaseOutcome::Completed { tool, exit } => {
                write!(f, "Command {} failed: {}", tool, exit)
            }
            PhaseOutcome::ToolNotFound { tool } => write!(f, "Tool {} not found", tool),
            PhaseOutcome::ToolNotInstalled { tool, install_hint } => {
                write!(f, "Tool {} not installed! Visit {}", tool, install_hint)
            }
            PhaseOutcome::LaunchFailed { tool, error } => {
                write!(f, "Error starting {}: {}", tool, error)
            }
        }
    }
}

/// Every phase outcome of one scenario run, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub scenario: String,
    pub outcomes: Vec<PhaseOutcome>,
}

impl ScenarioReport {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: PhaseOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// Phases that started (or tried to start) a process and did not succeed
    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded() - self.skipped()
    }
}
