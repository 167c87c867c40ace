//! Service configuration
//!
//! Loaded from an optional TOML file. Every section may be omitted:
//!
//! ```toml
//! bind_address = "0.0.0.0:5000"
//!
//! [logging]
//! level = "debug"
//! json = true
//!
//! [engine.sizing]
//! trunk_unit_size = 24
//! ```

use std::path::Path;

use ngn_dimensioning_core::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};
use crate::logging::{LoggingConfig, parse_log_level};

/// Default listen address, matching the port the web front end calls
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address for the HTTP service
    pub bind_address: String,
    /// Log output settings
    pub logging: LoggingSettings,
    /// Engine constants
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            logging: LoggingSettings::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Log output settings as written in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Minimum level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
    /// Include source file and line
    pub file_info: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_info: false,
        }
    }
}

impl LoggingSettings {
    /// Convert to a subscriber configuration
    pub fn to_logging_config(&self, app_name: &str) -> Result<LoggingConfig> {
        let mut config = LoggingConfig::new(parse_log_level(&self.level)?, app_name);
        if self.json {
            config = config.with_json();
        }
        if self.file_info {
            config = config.with_file_info();
        }
        Ok(config)
    }
}

impl ServerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ServerError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ServerError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.trim().is_empty() {
            return Err(ServerError::config("bind_address must not be empty"));
        }
        parse_log_level(&self.logging.level)?;
        self.engine.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn test_nested_engine_section() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind_address = "0.0.0.0:8080"

            [logging]
            level = "debug"
            json = true

            [engine.sizing]
            trunk_unit_size = 24
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert!(!config.logging.file_info);
        assert_eq!(config.engine.sizing.trunk_unit_size, 24);
        assert_eq!(config.engine.sizing.max_circuits, 100_000);
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let err = ServerConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_engine_validation_applies() {
        let err = ServerConfig::from_toml_str("[engine.sizing]\nmax_circuits = 0").unwrap_err();
        assert!(matches!(err, ServerError::Engine(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(ServerConfig::from_toml_str("bind_address = ").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(ServerConfig::load(Some(Path::new("/nonexistent/ngn.toml"))).is_err());
        assert!(ServerConfig::load(None).is_ok());
    }
}
