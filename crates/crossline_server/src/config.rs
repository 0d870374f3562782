//! Server configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then the `HOST` / `PORT` environment variables, then command-line flags.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for the game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    port: u16,

    /// Tell players why a move was refused instead of dropping it silently.
    #[serde(default)]
    reject_illegal_moves: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            reject_illegal_moves: false,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file when given and present, otherwise starts from defaults,
    /// then applies environment overrides.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                info!("Config file not found at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `HOST` and `PORT` overrides from the given lookup.
    #[instrument(skip(self, lookup))]
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            debug!(host = %host, "Host overridden from environment");
            self.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid PORT {:?}: {}", port, e)))?;
            debug!(port = self.port, "Port overridden from environment");
        }

        Ok(self)
    }

    /// Replaces the bind address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Replaces the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Turns explicit move rejections on or off.
    pub fn with_reject_illegal_moves(mut self, enabled: bool) -> Self {
        self.reject_illegal_moves = enabled;
        self
    }

    /// `host:port`, ready for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        let config = ServerConfig::default();
        assert_eq!(config.port(), &8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(!config.reject_illegal_moves());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("port = 9000\n").unwrap();
        assert_eq!(config.port(), &9000);
        assert_eq!(config.host(), "0.0.0.0");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml("port = \"not a number\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::default()
            .with_overrides(|key| match key {
                "PORT" => Some("3001".to_string()),
                "HOST" => Some("127.0.0.1".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3001");
    }

    #[test]
    fn test_bad_port_override_rejected() {
        let result = ServerConfig::default().with_overrides(|key| {
            (key == "PORT").then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let err = ServerConfig::from_file("/nonexistent/crossline.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }
}
