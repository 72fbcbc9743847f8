//! Installed-tool detection
//!
//! Resolves each catalog tool's executable probes against the system
//! `PATH` once at startup, before any tool is launched.

mod discovery;

pub use discovery::{DiscoveryResult, discover_tools};
