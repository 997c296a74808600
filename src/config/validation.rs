//! Configuration validation logic
//!
//! Each settings section checks its own values so that a bad configuration
//! is rejected at startup, before the provider handle is built.

use crate::config::error::ConfigError;
use crate::config::settings::{
    FcmConfig, FileSettings, LoggerSettings, ReceiverSettings, ServerConfig, Settings,
    WorkerConfig,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Use 127.0.0.1 for local access or 0.0.0.0 for all interfaces.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - If file logging is enabled, path must not be empty
    /// - Log format must be one of: full, compact, json
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl FcmConfig {
    /// Validate provider configuration
    ///
    /// The credentials themselves are checked when they are loaded; this only
    /// covers where to find them and how to reach the API.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials_env.trim().is_empty() && self.credentials_file.trim().is_empty() {
            return Err(ConfigError::validation(
                "fcm.credentials_file",
                "Either fcm.credentials_env or fcm.credentials_file must be set.",
            ));
        }

        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ConfigError::ValidationError {
                field: "fcm.api_base_url".to_string(),
                message: format!(
                    "Invalid API base URL '{}'. Expected an http:// or https:// URL.",
                    self.api_base_url
                ),
            });
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "fcm.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl ReceiverSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.icon.trim().is_empty() {
            return Err(ConfigError::validation(
                "receiver.icon",
                "Icon path must not be empty.",
            ));
        }
        Ok(())
    }
}

impl WorkerConfig {
    /// Validate worker script settings
    ///
    /// The identifiers may be blank (the worker is then reported as not
    /// configured), but `sdk_version` lands in the script's import URLs and
    /// must be a dotted version such as `9.22.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let components: Vec<&str> = self.sdk_version.split('.').collect();
        let well_formed = components.len() <= 3
            && components
                .iter()
                .all(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()));

        if !well_formed {
            return Err(ConfigError::ValidationError {
                field: "worker.sdk_version".to_string(),
                message: format!(
                    "Invalid SDK version '{}'. Expected a dotted version number such as 9.22.0.",
                    self.sdk_version
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.fcm.validate()?;
        self.receiver.validate()?;
        self.worker.validate()?;
        Ok(())
    }
}
