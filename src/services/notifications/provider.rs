//! Push provider abstraction.
//!
//! The dispatch path talks to the delivery service only through
//! [`PushProvider`], so the process-wide handle can be swapped for a stub.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::models::{DeliveryReceipt, NotificationRequest};

/// A remote push-delivery service (FCM, or a stub in tests).
///
/// Implementations are built once at startup and shared as
/// `Arc<dyn PushProvider>`; they must be `Send + Sync`.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl PushProvider for EchoProvider {
///     async fn send(&self, request: &NotificationRequest) -> Result<DeliveryReceipt, DeliveryError> {
///         Ok(DeliveryReceipt::new(format!("echo/{}", request.title())))
///     }
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Sends one notification. Called exactly once per dispatch; never retried.
    async fn send(&self, request: &NotificationRequest) -> Result<DeliveryReceipt, DeliveryError>;

    /// Provider name for logs and health output
    fn name(&self) -> &'static str;

    /// Checks that the provider can currently accept messages (default: always ready)
    async fn check_ready(&self) -> Result<(), DeliveryError> {
        Ok(())
    }
}
