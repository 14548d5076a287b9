//! Configuration management

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Workspace layout: where project work directories and the database live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root directory for all scanflow data
    pub data_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("var"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SCANFLOW").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        // Override the data directory from SCANFLOW_DATA_DIR if present
        if let Ok(data_dir) = std::env::var("SCANFLOW_DATA_DIR") {
            config.workspace.data_dir = PathBuf::from(data_dir);
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.workspace.data_dir.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "workspace.data_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Location of the workspace SQLite database file
    pub fn database_path(&self) -> PathBuf {
        self.workspace.data_dir.join("scanflow.db")
    }

    /// Root directory holding per-project work directories
    pub fn projects_dir(&self) -> PathBuf {
        self.workspace.data_dir.join("projects")
    }

    /// Data directory root
    pub fn data_dir(&self) -> &Path {
        &self.workspace.data_dir
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(PathBuf::from("var"), config.workspace.data_dir);
        assert_eq!("info", config.logging.level);
    }

    #[test]
    fn test_derived_paths() {
        let mut config = Config::default();
        config.workspace.data_dir = PathBuf::from("/srv/scanflow");
        assert_eq!(PathBuf::from("/srv/scanflow/scanflow.db"), config.database_path());
        assert_eq!(PathBuf::from("/srv/scanflow/projects"), config.projects_dir());
    }
}
