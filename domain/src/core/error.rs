//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool {0} not found")]
    ToolNotFound(String),

    #[error("Scenario {0} not found")]
    ScenarioNotFound(String),

    #[error("Scenario {0} already exists")]
    ScenarioExists(String),

    #[error("Invalid scenario name: {0:?}")]
    InvalidScenarioName(String),
}
