//! Configuration file
//!
//! Loaded and validated before anything else boots.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::auth::{PasswordPolicy, SessionConfig};
use crate::http_server::HttpServerConfig;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: HttpServerConfig,

    /// User store file; accounts are kept in memory only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Session lifetime in hours (default 24)
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// Log level used when `RUST_LOG` is unset (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Administrator seeded at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<BootstrapAdmin>,
}

/// Administrator account created on first start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_forename")]
    pub forename: String,
    #[serde(default = "default_admin_surname")]
    pub surname: String,
}

fn default_session_ttl_hours() -> i64 {
    24
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_admin_forename() -> String {
    "Admin".to_string()
}
fn default_admin_surname() -> String {
    "User".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            data_file: Some(PathBuf::from("./finplan-users.json")),
            session_ttl_hours: default_session_ttl_hours(),
            log_level: default_log_level(),
            admin: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: AppConfig = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Write configuration to a new file; fails if the file exists
    pub fn write_new(&self, path: &Path) -> CliResult<()> {
        if path.exists() {
            return Err(CliError::already_initialized(path));
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n").map_err(|e| {
            CliError::config_error(format!("Failed to write config {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    fn validate(&self) -> CliResult<()> {
        if self.session_ttl_hours <= 0 {
            return Err(CliError::config_error("session_ttl_hours must be > 0"));
        }

        if self.log_level.trim().is_empty() {
            return Err(CliError::config_error("log_level must not be empty"));
        }

        if let Some(admin) = &self.admin {
            if admin.email.trim().is_empty() {
                return Err(CliError::config_error("admin.email must not be empty"));
            }
            PasswordPolicy::default()
                .validate(&admin.password)
                .map_err(|e| CliError::config_error(format!("admin.password: {}", e)))?;
        }

        Ok(())
    }

    /// Session settings derived from this config
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            ttl: Duration::hours(self.session_ttl_hours),
        }
    }
}
