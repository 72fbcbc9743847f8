//! Domain layer for redteam-cli
//!
//! This crate contains the core entities and value objects of the
//! orchestrator. It has no dependencies on process spawning, file I/O or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool
//!
//! A named external executable with an argument template (`-sV {target}`),
//! an installation hint and a list of executable probes. Whether a tool is
//! installed is decided once at startup by the infrastructure layer.
//!
//! ## Scenario
//!
//! An ordered list of [`Phase`]s, each referencing a tool by name. A scenario
//! is a best-effort checklist: every phase is attempted, in order, whatever
//! happened to the previous one.
//!
//! ## Catalog
//!
//! The immutable set of tools and scenarios the whole run works against.

pub mod catalog;
pub mod core;
pub mod run;
pub mod scenario;
pub mod tool;

// Re-export commonly used types
pub use catalog::Catalog;
pub use core::error::DomainError;
pub use run::{
    context::RunContext,
    outcome::{ExitReport, PhaseOutcome, ScenarioReport, Termination},
    template::{substitute, tokenize_args},
};
pub use scenario::entities::{Phase, Scenario};
pub use tool::{catalog::ToolCatalog, entities::Tool};
