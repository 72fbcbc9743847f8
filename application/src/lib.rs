//! Application layer for redteam-cli
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    log_sink::{LineSink, LogSinkError, LogSinkFactory, NoLogSinks, OpenedLog},
    process_runner::{LaunchError, LaunchRequest, ProcessRunnerPort},
    progress::{NoProgress, RunProgressNotifier},
    scenario_repository::{RepositoryError, ScenarioRepository},
};
pub use use_cases::check_scenario::{
    CheckScenarioUseCase, PhaseReadiness, Readiness, ScenarioCheck,
};
pub use use_cases::edit_scenarios::{EditScenarioError, EditScenariosUseCase};
pub use use_cases::execute_phase::ExecutePhaseUseCase;
pub use use_cases::run_scenario::{RunScenarioError, RunScenarioUseCase};
pub use use_cases::run_tool::{RunToolError, RunToolUseCase};
