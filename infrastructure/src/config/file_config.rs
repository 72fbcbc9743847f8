//! Raw JSON configuration data types
//!
//! These structs mirror the on-disk files exactly and reuse domain types for
//! tools and scenarios.

use redteam_domain::{Scenario, Tool};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory for per-invocation log files
pub const DEFAULT_LOG_DIR: &str = "redteam_logs";

/// Default tool catalog location
pub const DEFAULT_TOOL_DB: &str = "tool_db.json";

/// The user configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUserConfig {
    /// Saved scenarios
    pub scenarios: Vec<Scenario>,
    /// Legacy tool list. Kept on disk for compatibility; the tool catalog
    /// file replaces it at startup.
    pub tools: Vec<Tool>,
    pub settings: FileSettings,
}

/// Run settings; every field can be overridden on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Directory for log files, relative to the working directory
    pub log_dir: PathBuf,
    /// Tool catalog path
    pub tool_db: PathBuf,
    /// Kill a tool after this many seconds (0 = never)
    pub phase_timeout_secs: u64,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            tool_db: PathBuf::from(DEFAULT_TOOL_DB),
            phase_timeout_secs: 0,
        }
    }
}

/// Accepted shapes of the tool catalog file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolDbFile {
    /// A bare array of tool records
    List(Vec<Tool>),
    /// `{"tools": [...]}`
    Wrapped { tools: Vec<Tool> },
}

impl ToolDbFile {
    pub fn into_tools(self) -> Vec<Tool> {
        match self {
            ToolDbFile::List(tools) | ToolDbFile::Wrapped { tools } => tools,
        }
    }
}
