//! Configuration management for FileGate Server
//!
//! All settings are loaded once at startup from config.toml (with
//! FILEGATE_* environment overrides) and never change afterwards.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// One user as declared in configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct UserRecord {
    pub username: String,

    /// Hex-encoded SHA-256 digest of the password (see the genhash binary).
    pub password_sha256: String,
}

/// Complete server configuration, loaded once during initialization.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Root directory for listing and download requests
    pub root_files_path: String,

    /// Session lifetime in seconds
    pub session_ttl_secs: u64,

    /// Buffer size for download streaming
    pub buffer_size: usize,

    /// Upper bound on one listing request, including the stat fan-out
    pub request_timeout_secs: u64,

    /// Input limits
    pub max_username_length: usize,
    pub max_path_length: usize,

    /// Accounts allowed to log in
    pub users: Vec<UserRecord>,
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Try production path first, then development path
        let config_paths = vec![
            "filegate-server/config", // Docker production: /app/filegate-server/config.toml
            "config",                 // Local development: ./config.toml
        ];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("FILEGATE").separator("_"))
                .build()
            {
                Ok(settings) => {
                    let config: ServerConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            config::ConfigError::Message(format!(
                "failed to load config.toml from any location, tried: {config_paths:?}"
            ))
        }))
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("Port cannot be 0".into()));
        }

        if self.root_files_path.is_empty() {
            return Err(config::ConfigError::Message(
                "root_files_path cannot be empty".into(),
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err(config::ConfigError::Message(
                "session_ttl_secs must be greater than 0".into(),
            ));
        }

        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.users.is_empty() {
            return Err(config::ConfigError::Message(
                "at least one user must be configured".into(),
            ));
        }

        for user in &self.users {
            if user.username.is_empty() || user.username.len() > self.max_username_length {
                return Err(config::ConfigError::Message(format!(
                    "invalid username in user list: {:?}",
                    user.username
                )));
            }
            let digest = &user.password_sha256;
            if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(config::ConfigError::Message(format!(
                    "password_sha256 for {} must be a 64-character hex digest",
                    user.username
                )));
            }
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the root files directory as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_files_path)
    }

    /// Get session lifetime as Duration
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Get the listing request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
