//! Configuration file loading for redteam-cli
//!
//! Two files feed a run:
//!
//! 1. The user configuration (`~/.redteam-cli-config.json` or `--config`),
//!    holding saved scenarios and settings. Created with defaults if absent.
//!    Values are layered: built-in defaults, then the JSON file, then
//!    `RTCLI_`-prefixed environment variables.
//! 2. The tool catalog (`tool_db.json`), read-only and required.

mod file_config;
mod loader;
mod repository;

pub use file_config::{FileSettings, FileUserConfig, ToolDbFile};
pub use loader::{CONFIG_FILE_NAME, ConfigError, ConfigLoader, ENV_PREFIX};
pub use repository::JsonScenarioRepository;
