//! Configuration management module for push-relay
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Multiple environment configurations (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base configuration (optional, built-in defaults otherwise)
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `RELAY_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{
    FallbackPolicy, FcmConfig, ReceiverSettings, ServerConfig, Settings, WorkerConfig,
};
