//! Service layer.
//!
//! Services hold the application logic shared by the HTTP handlers and the
//! CLI commands.

pub mod notifications;

pub use notifications::{DispatchService, PushProvider, redact_token};
