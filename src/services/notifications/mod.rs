//! Notification dispatch with a pluggable push provider.
//!
//! `DispatchService` is the single dispatch operation shared by the HTTP and
//! CLI adapters; `PushProvider` is the seam to the delivery service.

mod dispatch_service;
mod provider;

pub use dispatch_service::{DispatchService, redact_token};
pub use provider::PushProvider;

#[cfg(test)]
pub(crate) use provider::testing;
