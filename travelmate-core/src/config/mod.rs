//! Configuration for the TravelMate client
//!
//! Configuration can come from defaults, a YAML file (with `${VAR}`
//! environment interpolation), and `TRAVELMATE_*` environment overrides, in
//! that order of precedence.

mod env;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Greeting shown before any user interaction. It seeds the message history
/// and is always excluded from outgoing context.
pub const DEFAULT_GREETING: &str =
    "Hello! I'm your travel assistant. Ask me about the weather or places to visit in any location!";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("environment variable '{var}' not found")]
    EnvVarNotFound { var: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the travel assistant service
    pub base_url: String,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Assistant greeting used to seed a new session
    pub greeting: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout_secs: 10,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file, interpolating `${VAR}`
    /// references from the environment before parsing.
    pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let interpolated = env::interpolate_env_vars(&content)?;

        let config: ClientConfig =
            serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::Parse {
                path: path.to_string_lossy().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `TRAVELMATE_BASE_URL` and `TRAVELMATE_CONNECT_TIMEOUT_SECS`
    /// overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(base_url) = std::env::var("TRAVELMATE_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("TRAVELMATE_CONNECT_TIMEOUT_SECS") {
            self.connect_timeout_secs =
                timeout.parse().map_err(|_| ConfigError::Invalid {
                    message: format!(
                        "TRAVELMATE_CONNECT_TIMEOUT_SECS must be an integer, got '{timeout}'"
                    ),
                })?;
        }
        self.validate()
    }

    /// Validate field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::Invalid {
            message: format!("base_url '{}': {}", self.base_url, e),
        })?;
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "connect_timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ClientConfig {
            connect_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
