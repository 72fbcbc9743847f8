//! Configuration file loader with multi-source merging

use super::file_config::{FileUserConfig, ToolDbFile};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use redteam_domain::{Scenario, Tool};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// User configuration file name, placed in the home directory
pub const CONFIG_FILE_NAME: &str = ".redteam-cli-config.json";

/// Prefix for environment overrides, e.g. `RTCLI_SETTINGS__LOG_DIR`
pub const ENV_PREFIX: &str = "RTCLI_";

/// Errors raised while reading or writing configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("error loading config {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("error writing config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config {} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("error serializing config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("error loading tool DB {}: {source}", .path.display())]
    ToolDbRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing tool DB {}: {source}", .path.display())]
    ToolDbParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.redteam-cli-config.json`
    pub fn user_config_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Load the user configuration, creating it with defaults if absent.
    ///
    /// Priority (highest to lowest):
    /// 1. `RTCLI_`-prefixed environment variables (`__` separates levels)
    /// 2. The JSON file at `path`
    /// 3. Default values
    pub fn load_user_config(path: &Path) -> Result<FileUserConfig, ConfigError> {
        Self::ensure_exists(path)?;
        Self::file_figment(path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Load {
                path: path.to_path_buf(),
                source: Box::new(e),
            })
    }

    /// Load only what is stored in the file, without environment overrides.
    ///
    /// Used when the file is about to be rewritten, so overrides never leak
    /// onto disk.
    pub fn read_user_config(path: &Path) -> Result<FileUserConfig, ConfigError> {
        Self::ensure_exists(path)?;
        Self::file_figment(path)
            .extract()
            .map_err(|e| ConfigError::Load {
                path: path.to_path_buf(),
                source: Box::new(e),
            })
    }

    /// Write the configuration as pretty JSON, readable by the owner only.
    pub fn save_user_config(path: &Path, config: &FileUserConfig) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(config)?;
        Self::write_private(path, data.as_bytes()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace the `scenarios` list in the file, leaving every other key as
    /// it is on disk.
    pub fn save_scenarios(path: &Path, scenarios: &[Scenario]) -> Result<(), ConfigError> {
        Self::ensure_exists(path)?;
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut root: Value = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let object = root
            .as_object_mut()
            .ok_or_else(|| ConfigError::NotAnObject {
                path: path.to_path_buf(),
            })?;
        object.insert("scenarios".to_string(), serde_json::to_value(scenarios)?);

        let data = serde_json::to_string_pretty(&root)?;
        Self::write_private(path, data.as_bytes()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved {} scenarios to {}", scenarios.len(), path.display());
        Ok(())
    }

    /// Read the tool catalog: a bare array or a `{"tools": [...]}` object.
    pub fn load_tool_db(path: &Path) -> Result<Vec<Tool>, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::ToolDbRead {
            path: path.to_path_buf(),
            source,
        })?;
        let db: ToolDbFile =
            serde_json::from_str(&data).map_err(|source| ConfigError::ToolDbParse {
                path: path.to_path_buf(),
                source,
            })?;
        let tools = db.into_tools();
        debug!("Loaded {} tools from {}", tools.len(), path.display());
        Ok(tools)
    }

    fn file_figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(FileUserConfig::default()))
            .merge(Json::file(path))
    }

    fn ensure_exists(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Ok(());
        }
        info!("Creating default config at {}", path.display());
        Self::save_user_config(path, &FileUserConfig::default())
    }

    #[cfg(unix)]
    fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        // mode() only applies on creation
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        file.write_all(data)
    }

    #[cfg(not(unix))]
    fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.write_all(data)
    }
}
