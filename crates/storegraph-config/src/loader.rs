//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::Path;
use storegraph_common::Result as StoregraphResult;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for storegraph_common::StoregraphError {
    fn from(err: ConfigError) -> Self {
        storegraph_common::StoregraphError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!(path = %path.as_ref().display(), "Loading configuration file");

        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        config
            .validate_all()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> StoregraphResult<Config> {
        let config = if let Ok(config_path) = env::var("STOREGRAPH_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("storegraph.yaml").exists() {
            Self::load_config("storegraph.yaml")?
        } else if Path::new("storegraph.yml").exists() {
            Self::load_config("storegraph.yml")?
        } else {
            // No config file found, use the built-in scenarios with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)
                .map_err(storegraph_common::StoregraphError::from)?;
            config.validate_all()?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StoregraphResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(path) = env::var("STOREGRAPH_DATASET") {
            config.dataset.path = path;
        }

        if let Ok(level) = env::var("STOREGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(force) = env::var("STOREGRAPH_FORCE_VISIBLE") {
            let force: bool = force.parse().map_err(|e| ConfigError::EnvParse {
                var: "STOREGRAPH_FORCE_VISIBLE".to_string(),
                source: Box::new(e),
            })?;
            for scenario in &mut config.scenarios {
                scenario.gate.force_visible = force;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = ConfigLoader::load_config(file.path()).unwrap();
        assert_eq!(loaded.scenarios.len(), config.scenarios.len());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = ConfigLoader::load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_rejects_bad_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"scenarios: [not, a, config").unwrap();

        let err = ConfigLoader::load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_dataset_env_override() {
        let mut config = Config::default();
        env::set_var("STOREGRAPH_DATASET", "/tmp/other.csv");
        ConfigLoader::apply_env_overrides(&mut config).unwrap();
        env::remove_var("STOREGRAPH_DATASET");

        assert_eq!(config.dataset.path, "/tmp/other.csv");
    }
}
