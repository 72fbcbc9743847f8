//! Scenario domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Tool reference, matched case-insensitively against the catalog
    pub tool: String,
    /// Argument template for this step. Empty means no arguments; the
    /// tool's own template is not used as a fallback.
    #[serde(default)]
    pub args: String,
}

impl Phase {
    pub fn new(tool: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            args: args.into(),
        }
    }
}

/// A named, ordered sequence of phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub phases: Vec<Phase>,
    /// Declared precondition identifiers. Stored and listed, never evaluated.
    #[serde(default)]
    pub prechecks: Vec<String>,
}

impl Scenario {
    /// Create an empty scenario, rejecting blank names.
    pub fn named(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidScenarioName(name));
        }
        Ok(Self {
            name,
            phases: Vec::new(),
            prechecks: Vec::new(),
        })
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn push_phase(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}
