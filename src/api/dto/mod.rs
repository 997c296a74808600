//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `notification` - dispatch request DTOs
//! - `health` - health check responses
//! - `error` - Common error response DTOs

mod error;
mod health;
mod notification;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use notification::{SEND_SUCCESS_MESSAGE, SendNotificationRequest};
