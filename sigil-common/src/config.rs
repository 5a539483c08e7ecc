//! Configuration for the login form and its collaborators
//!
//! Settings are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. Configuration file (TOML format)
//! 3. Default values (lowest priority)

use crate::auth::{default_credentials, CredentialRecord, StaticCredentials};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigilConfig {
    /// Login flow texts and routes
    pub login: LoginConfig,
    /// Toast presentation
    pub notifications: NotificationConfig,
    /// Breakpoint settings
    pub layout: LayoutConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Mock credential table used by the built-in credential check
    pub credentials: Vec<CredentialRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Route opened after a successful login
    pub success_route: String,
    pub success_message: String,
    pub failure_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Auto-dismiss delay; 0 keeps toasts until closed
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewport widths up to this value use the compact layout
    pub compact_max_width: u32,
}

impl Default for SigilConfig {
    fn default() -> Self {
        Self {
            login: LoginConfig::default(),
            notifications: NotificationConfig::default(),
            layout: LayoutConfig::default(),
            logging: LoggingConfig::default(),
            credentials: default_credentials(),
        }
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            success_route: "/dashboard".to_string(),
            success_message: "Logged in successfully".to_string(),
            failure_message: "Invalid username or password".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 5000 }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_max_width: 639,
        }
    }
}

impl SigilConfig {
    /// Load configuration from environment variables and optional config file
    pub fn load() -> Self {
        Self::load_with(Self::find_config_file(), |key| std::env::var(key).ok())
    }

    /// `load` over an explicit file and variable lookup. A file that cannot
    /// be read, parsed or validated is reported and replaced by defaults.
    pub fn load_with(config_path: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(config_path) = config_path {
            match Self::load_from_file(&config_path) {
                Ok(file_config) => config = file_config,
                Err(err) => warn!(path = %config_path.display(), error = %err, "Ignoring config file"),
            }
        }

        config.apply_overrides(lookup);
        config
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e.to_string()))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            std::env::var("SIGIL_CONFIG").ok().map(PathBuf::from),
            Some(PathBuf::from("./sigil.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(route) = lookup("SIGIL_SUCCESS_ROUTE") {
            self.login.success_route = route;
        }
        if let Some(level) = lookup("SIGIL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(duration) = lookup("SIGIL_TOAST_DURATION_MS") {
            if let Ok(duration) = duration.parse() {
                self.notifications.duration_ms = duration;
            }
        }
        if let Some(width) = lookup("SIGIL_COMPACT_MAX_WIDTH") {
            if let Ok(width) = width.parse() {
                self.layout.compact_max_width = width;
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.login.success_route.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "success_route must be an absolute path, got '{}'",
                self.login.success_route
            )));
        }

        if self.login.failure_message.trim().is_empty() {
            return Err(ConfigError::Validation(
                "failure_message cannot be empty".to_string(),
            ));
        }

        for (i, record) in self.credentials.iter().enumerate() {
            if record.username.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "credential #{} has an empty username",
                    i + 1
                )));
            }
            if self.credentials[..i]
                .iter()
                .any(|r| r.username == record.username)
            {
                return Err(ConfigError::Validation(format!(
                    "duplicate credential for '{}'",
                    record.username
                )));
            }
        }

        Ok(())
    }

    pub fn credential_check(&self) -> StaticCredentials {
        StaticCredentials::new(self.credentials.clone())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0:?}: {1}")]
    FileRead(PathBuf, String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Config validation failed: {0}")]
    Validation(String),
}
