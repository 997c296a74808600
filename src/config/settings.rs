//! Configuration settings structures for push-relay
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "push-relay".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/push-relay.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_credentials_env() -> String {
    "FIREBASE_SERVICE_ACCOUNT_KEY".to_string()
}

fn default_credentials_file() -> String {
    "serviceAccountKey.json".to_string()
}

fn default_fcm_api_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_fcm_request_timeout() -> u64 {
    30
}

fn default_icon() -> String {
    "/icons/Icon-192.png".to_string()
}

fn default_generic_title() -> String {
    "New notification".to_string()
}

fn default_generic_body() -> String {
    "You have a new message".to_string()
}

fn default_sdk_version() -> String {
    "9.22.0".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to answer cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_true(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }
}

// ============================================================================
// FCM Configuration
// ============================================================================

/// Firebase Cloud Messaging provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcmConfig {
    /// Environment variable holding the service-account key JSON.
    /// Takes precedence over `credentials_file` when set and non-empty.
    #[serde(default = "default_credentials_env")]
    pub credentials_env: String,

    /// Path to the service-account key file
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,

    /// Base URL of the FCM HTTP v1 API
    #[serde(default = "default_fcm_api_base_url")]
    pub api_base_url: String,

    /// Timeout for a single provider call in seconds
    #[serde(default = "default_fcm_request_timeout")]
    pub request_timeout: u64,

    /// Ask FCM to validate messages without delivering them
    #[serde(default)]
    pub validate_only: bool,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            credentials_env: default_credentials_env(),
            credentials_file: default_credentials_file(),
            api_base_url: default_fcm_api_base_url(),
            request_timeout: default_fcm_request_timeout(),
            validate_only: false,
        }
    }
}

// ============================================================================
// Background Receiver Configuration
// ============================================================================

/// What the background receiver does with a payload that carries no
/// `notification` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Log and render nothing
    #[default]
    Drop,
    /// Render the configured generic title and body
    Generic,
}

/// Background receiver rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverSettings {
    /// Icon resource attached to every rendered notification
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Behavior when a payload has no notification block
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Title used by the generic fallback
    #[serde(default = "default_generic_title")]
    pub generic_title: String,

    /// Body used by the generic fallback
    #[serde(default = "default_generic_body")]
    pub generic_body: String,
}

impl Default for ReceiverSettings {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            fallback: FallbackPolicy::default(),
            generic_title: default_generic_title(),
            generic_body: default_generic_body(),
        }
    }
}

/// Firebase web-app identifiers embedded into the browser worker script.
///
/// These are public client identifiers, not secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub storage_bucket: String,
    #[serde(default)]
    pub messaging_sender_id: String,
    #[serde(default)]
    pub app_id: String,
    /// Firebase JS SDK version loaded by the worker
    #[serde(default = "default_sdk_version")]
    pub sdk_version: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_domain: String::new(),
            project_id: String::new(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            sdk_version: default_sdk_version(),
        }
    }
}

impl WorkerConfig {
    /// True once the identifiers the messaging SDK needs are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
            && !self.project_id.is_empty()
            && !self.messaging_sender_id.is_empty()
            && !self.app_id.is_empty()
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Push provider configuration
    #[serde(default)]
    pub fcm: FcmConfig,

    /// Background receiver configuration
    #[serde(default)]
    pub receiver: ReceiverSettings,

    /// Browser worker identifiers
    #[serde(default)]
    pub worker: WorkerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
            any::<bool>(),
        )
            .prop_map(|(host, port, cors_enabled)| ServerConfig {
                host,
                port,
                cors_enabled,
            })
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
            any::<bool>(),
            any::<bool>(),
            prop_oneof![
                Just("json".to_string()),
                Just("full".to_string()),
                Just("compact".to_string()),
            ],
        )
            .prop_map(|(level, colored, file_enabled, format)| LoggerSettings {
                level,
                console: ConsoleSettings {
                    enabled: true,
                    colored,
                },
                file: FileSettings {
                    enabled: file_enabled,
                    format,
                    ..Default::default()
                },
            })
    }

    fn arb_fcm_config() -> impl Strategy<Value = FcmConfig> {
        ("[A-Z_]{1,32}", "[a-z/]{1,24}\\.json", 1u64..=120u64, any::<bool>()).prop_map(
            |(credentials_env, credentials_file, request_timeout, validate_only)| FcmConfig {
                credentials_env,
                credentials_file,
                request_timeout,
                validate_only,
                ..Default::default()
            },
        )
    }

    fn arb_receiver_settings() -> impl Strategy<Value = ReceiverSettings> {
        (
            "/[a-z]{1,10}/[A-Za-z0-9-]{1,12}\\.png",
            prop_oneof![Just(FallbackPolicy::Drop), Just(FallbackPolicy::Generic)],
        )
            .prop_map(|(icon, fallback)| ReceiverSettings {
                icon,
                fallback,
                ..Default::default()
            })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_server_config(),
            arb_logger_settings(),
            arb_fcm_config(),
            arb_receiver_settings(),
        )
            .prop_map(|(server, logger, fcm, receiver)| Settings {
                server,
                logger,
                fcm,
                receiver,
                ..Default::default()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_settings_survive_toml(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings).expect("Settings should serialize to TOML");
            let parsed: Settings = toml::from_str(&toml_str).expect("TOML should parse back");
            prop_assert_eq!(settings, parsed);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "push-relay");
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
        assert!(settings.server.cors_enabled);
        assert_eq!(settings.fcm.credentials_env, "FIREBASE_SERVICE_ACCOUNT_KEY");
        assert_eq!(settings.fcm.credentials_file, "serviceAccountKey.json");
        assert_eq!(settings.fcm.api_base_url, "https://fcm.googleapis.com");
        assert_eq!(settings.receiver.icon, "/icons/Icon-192.png");
        assert_eq!(settings.receiver.fallback, FallbackPolicy::Drop);
        assert_eq!(settings.worker.sdk_version, "9.22.0");
    }

    #[test]
    fn test_shipped_default_toml_matches_builtin_defaults() {
        let settings: Settings = toml::from_str(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[server]
port = 8080

[receiver]
fallback = "generic"
"#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.receiver.fallback, FallbackPolicy::Generic);
        assert_eq!(settings.receiver.generic_title, "New notification");
    }

    #[test]
    fn test_worker_is_configured() {
        let mut worker = WorkerConfig::default();
        assert!(!worker.is_configured());

        worker.api_key = "key".to_string();
        worker.project_id = "demo-project".to_string();
        worker.messaging_sender_id = "1234".to_string();
        worker.app_id = "1:1234:web:abcd".to_string();
        assert!(worker.is_configured());
    }

    #[test]
    fn test_logger_settings_into_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            file: FileSettings {
                format: "compact".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.file.format, LogFormat::Compact);
    }
}
