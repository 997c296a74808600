use thiserror::Error;

/// Failure reported by a push provider.
///
/// Covers both provider-side rejections (invalid token, quota exceeded,
/// unauthorized sender) and transport failures. The message is the provider's
/// own text and is safe to echo to callers; it never contains the full
/// recipient token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DeliveryError {
    /// Provider error text
    pub message: String,
    /// HTTP status returned by the provider, if a response was received
    pub status_code: Option<u16>,
    /// Provider-specific error status (e.g. `UNREGISTERED`, `INVALID_ARGUMENT`)
    pub provider_status: Option<String>,
}

impl DeliveryError {
    /// Creates a delivery error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            provider_status: None,
        }
    }

    /// Attaches the provider's HTTP status code.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attaches the provider's error status string.
    pub fn with_provider_status(mut self, status: impl Into<String>) -> Self {
        self.provider_status = Some(status.into());
        self
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(error: reqwest::Error) -> Self {
        let delivery = DeliveryError::new(error.to_string());
        match error.status() {
            Some(status) => delivery.with_status_code(status.as_u16()),
            None => delivery,
        }
    }
}

/// Application-wide error type.
///
/// `MissingField` is a client input defect that never reaches the provider;
/// `Delivery` is a provider-side failure. Everything else is ambient
/// (configuration, credentials, malformed input).
#[derive(Error, Debug)]
pub enum AppError {
    /// A required notification field was absent or empty
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// The push provider rejected the message or could not be reached
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Provider credentials could not be loaded or parsed
    #[error("Credentials error: {message}")]
    Credentials {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Creates a credentials error without an underlying source.
    pub fn credentials(message: impl Into<String>) -> Self {
        AppError::Credentials {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingField { .. } | AppError::Validation { .. } | AppError::BadRequest { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        AppError::Configuration {
            key: error.key().to_string(),
            source: error.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.into_iter().next() {
            Some((field, field_errors)) => {
                let reason = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                AppError::Validation {
                    field: field.to_string(),
                    reason,
                }
            }
            None => AppError::Validation {
                field: "unknown".to_string(),
                reason: errors.to_string(),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
