//! Firebase Cloud Messaging (HTTP v1) integration.
//!
//! - `credentials`: service-account key loading and validation
//! - `auth`: OAuth access tokens minted from the key
//! - `client`: the [`FcmProvider`] push provider

pub mod auth;
mod client;
pub mod credentials;

pub use client::FcmProvider;
pub use credentials::{CredentialSource, ServiceAccountKey, load_service_account};
