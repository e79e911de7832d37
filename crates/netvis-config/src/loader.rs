//! Configuration loading utilities

use crate::Config;
use netvis_common::Result as VisResult;
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_VAR: &str = "NETVIS_CONFIG_PATH";

/// Config files looked up in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["netvis.yaml", "netvis.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for netvis_common::VisError {
    fn from(err: ConfigError) -> Self {
        netvis_common::VisError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse_yaml(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parse YAML text into a configuration; missing sections take defaults
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from the environment and the working directory
    pub fn load() -> VisResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Ok(Self::load_config(&config_path)?);
        }

        if let Some(found) = DEFAULT_CONFIG_FILES.iter().find(|f| Path::new(f).exists()) {
            return Ok(Self::load_config(found)?);
        }

        // No config file found, use defaults with env overrides
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> VisResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup("NETVIS_COORDS_INPUT") {
            config.coords.input = input;
        }

        if let Some(output) = lookup("NETVIS_COORDS_OUTPUT") {
            config.coords.output = output;
        }

        if let Some(input) = lookup("NETVIS_PATHS_INPUT") {
            config.paths.input = input;
        }

        if let Some(output) = lookup("NETVIS_PATHS_OUTPUT") {
            config.paths.output = output;
        }

        if let Some(width) = lookup("NETVIS_WIDTH") {
            let width = parse_var("NETVIS_WIDTH", &width)?;
            config.coords.width = width;
            config.paths.width = width;
        }

        if let Some(height) = lookup("NETVIS_HEIGHT") {
            let height = parse_var("NETVIS_HEIGHT", &height)?;
            config.coords.height = height;
            config.paths.height = height;
        }

        if let Some(iterations) = lookup("NETVIS_LAYOUT_ITERATIONS") {
            config.paths.layout.iterations = parse_var("NETVIS_LAYOUT_ITERATIONS", &iterations)?;
        }

        if let Some(level) = lookup("NETVIS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary YAML config file for testing
    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_partial_yaml_uses_defaults() {
        let yaml = "paths:\n  input: \"sim/log.txt\"\n  layout:\n    iterations: 50\n";
        let config = ConfigLoader::parse_yaml(yaml).expect("Failed to parse config");

        assert_eq!(config.paths.input, "sim/log.txt");
        assert_eq!(config.paths.layout.iterations, 50);
        assert_eq!(config.paths.output, "network_graph.png");
        assert_eq!(config.coords.input, "graph.dat");
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = ConfigLoader::parse_yaml("  \n").expect("Empty config should be accepted");
        assert_eq!(config.paths.width, 1000);
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_file = create_test_config_file("coords:\n  input: [unclosed");
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let temp_file = create_test_config_file("coords:\n  width: 10\n  point_color: \"red\"\n");
        let result = ConfigLoader::load_config(temp_file.path());

        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/netvis.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_overrides_replace_values() {
        let env = vars(&[
            ("NETVIS_PATHS_INPUT", "run-7/log.txt"),
            ("NETVIS_WIDTH", "1500"),
            ("NETVIS_LAYOUT_ITERATIONS", "42"),
            ("NETVIS_LOG_LEVEL", "debug"),
        ]);
        let mut config = Config::default();

        ConfigLoader::apply_overrides(&mut config, |k| env.get(k).cloned())
            .expect("Overrides should apply");

        assert_eq!(config.paths.input, "run-7/log.txt");
        assert_eq!(config.paths.width, 1500);
        assert_eq!(config.coords.width, 1500);
        assert_eq!(config.paths.layout.iterations, 42);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.coords.input, "graph.dat");
    }

    #[test]
    fn test_override_parse_error() {
        let env = vars(&[("NETVIS_HEIGHT", "tall")]);
        let mut config = Config::default();

        let result = ConfigLoader::apply_overrides(&mut config, |k| env.get(k).cloned());
        match result {
            Err(ConfigError::EnvParseError { var, .. }) => assert_eq!(var, "NETVIS_HEIGHT"),
            other => panic!("Expected EnvParseError, got {:?}", other),
        }
    }
}
