//! Application configuration
//!
//! A single JSON file. Every section is optional and falls back to its
//! defaults; a missing file means all defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;
use crate::rest_api::EmptyBodyPolicy;
use crate::store::DatabaseConfig;

use super::errors::{CliError, CliResult};

/// Environment variable that replaces `database.url`
pub const DATABASE_URL_ENV: &str = "NEWSDESK_DATABASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// What insert endpoints do with a body that has no keys
    #[serde(default)]
    pub empty_body: EmptyBodyPolicy,
}

impl AppConfig {
    /// Load configuration from file, apply the environment and validate
    pub fn load(path: &Path) -> CliResult<Self> {
        let mut config = Self::read(path)?;
        config.apply_database_url(std::env::var(DATABASE_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse the file without touching the environment
    pub fn read(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Replace the database url when an override is present
    pub fn apply_database_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
    }

    /// Copy safe to print: the database password is masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.database.url = self.database.redacted_url();
        config
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        if !(self.database.url.starts_with("postgres://")
            || self.database.url.starts_with("postgresql://"))
        {
            return Err(CliError::config_error(format!(
                "Invalid database.url: '{}'. Must start with postgres:// or postgresql://",
                self.database.url
            )));
        }

        if self.database.max_connections == 0 {
            return Err(CliError::config_error("database.max_connections must be > 0"));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            CliError::config_error(format!(
                "Invalid logging.level '{}': {}",
                self.logging.level, e
            ))
        })?;

        Ok(())
    }
}
