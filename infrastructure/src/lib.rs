//! Infrastructure layer for redteam-cli
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Tokio process runner, per-invocation log files,
//! configuration and tool catalog loading, and tool discovery.

pub mod config;
pub mod logging;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileSettings, FileUserConfig, JsonScenarioRepository, ToolDbFile,
};
pub use logging::{FileLogSink, FileLogSinkFactory};
pub use process::TokioProcessRunner;
pub use tools::{DiscoveryResult, discover_tools};
