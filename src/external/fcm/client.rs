//! FCM HTTP v1 push provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::auth::TokenSource;
use super::credentials::{CredentialSource, ServiceAccountKey, load_service_account};
use crate::config::FcmConfig;
use crate::error::{AppResult, DeliveryError};
use crate::external::client::HTTP_CLIENT;
use crate::models::{DeliveryReceipt, NotificationRequest};
use crate::services::PushProvider;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    validate_only: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
}

#[derive(Debug, Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Push provider backed by Firebase Cloud Messaging
pub struct FcmProvider {
    project_id: String,
    send_url: String,
    validate_only: bool,
    timeout: Duration,
    credential_source: CredentialSource,
    tokens: TokenSource,
}

impl FcmProvider {
    /// Loads credentials as configured and builds the provider.
    ///
    /// Fails when the key cannot be found, does not parse, or holds an
    /// unusable private key. Callers treat this as fatal at startup.
    pub fn from_config(config: &FcmConfig) -> AppResult<Self> {
        let (key, source) = load_service_account(config)?;
        Self::new(&key, source, config)
    }

    pub fn new(
        key: &ServiceAccountKey,
        credential_source: CredentialSource,
        config: &FcmConfig,
    ) -> AppResult<Self> {
        let timeout = Duration::from_secs(config.request_timeout);
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            config.api_base_url.trim_end_matches('/'),
            key.project_id
        );

        Ok(Self {
            project_id: key.project_id.clone(),
            send_url,
            validate_only: config.validate_only,
            timeout,
            credential_source,
            tokens: TokenSource::new(key, timeout)?,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn credential_source(&self) -> &CredentialSource {
        &self.credential_source
    }

    fn error_from_response(status: reqwest::StatusCode, text: &str) -> DeliveryError {
        let error = match serde_json::from_str::<ErrorEnvelope>(text) {
            Ok(envelope) if !envelope.error.message.is_empty() => {
                let error = DeliveryError::new(envelope.error.message);
                match envelope.error.status {
                    Some(provider_status) => error.with_provider_status(provider_status),
                    None => error,
                }
            }
            _ => DeliveryError::new(format!("FCM returned HTTP {}", status.as_u16())),
        };
        error.with_status_code(status.as_u16())
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send(&self, request: &NotificationRequest) -> Result<DeliveryReceipt, DeliveryError> {
        let access_token = self.tokens.access_token().await?;

        let body = SendRequest {
            message: Message {
                token: request.recipient_token(),
                notification: Notification {
                    title: request.title(),
                    body: request.body(),
                },
            },
            validate_only: self.validate_only,
        };

        let response = HTTP_CLIENT
            .post(&self.send_url)
            .timeout(self.timeout)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::error_from_response(status, &text));
        }

        let sent: SendResponse = serde_json::from_str(&text).map_err(|e| {
            DeliveryError::new(format!("Unexpected FCM response: {}", e))
                .with_status_code(status.as_u16())
        })?;

        Ok(DeliveryReceipt::new(sent.name))
    }

    fn name(&self) -> &'static str {
        "fcm"
    }

    async fn check_ready(&self) -> Result<(), DeliveryError> {
        self.tokens.access_token().await.map(|_| ())
    }
}
