//! Presentation layer for redteam-cli
//!
//! This crate contains the CLI definition, console formatters and the
//! progress reporter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ListTarget, ParseFailure, ScenarioAction, ToolAction, classify_parse_error,
    normalize_legacy_flags,
};
pub use output::console::{ConsoleFormatter, ConsoleLineSink};
pub use progress::reporter::ConsoleProgress;
