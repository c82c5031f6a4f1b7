//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "tessel.toml";

/// Loads and validates a `tessel.toml` configuration from a project directory.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    let content =
        std::fs::read_to_string(&path).map_err(|source| ConfigError::Io { path, source })?;
    load_config_from_str(&content)
}

/// Parses and validates a `tessel.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.trim().is_empty() {
        return Err(ConfigError::MissingField("project.name"));
    }
    if config.generate.pad_prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            key: "generate.pad_prefix",
            reason: format!("'{}' contains whitespace", config.generate.pad_prefix),
        });
    }
    for (key, value) in [
        ("paths.bus", &config.paths.bus),
        ("paths.module", &config.paths.module),
        ("paths.output", &config.paths.output),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key,
                reason: "directory must not be empty".to_string(),
            });
        }
    }
    Ok(())
}
