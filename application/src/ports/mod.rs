//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod log_sink;
pub mod process_runner;
pub mod progress;
pub mod scenario_repository;
