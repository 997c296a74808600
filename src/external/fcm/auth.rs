//! OAuth 2.0 access tokens for the FCM HTTP v1 API.
//!
//! Implements the service-account JWT bearer flow: a short-lived RS256
//! assertion signed with the account key is exchanged at `token_uri` for an
//! access token, which is cached until shortly before it expires.

use std::time::Duration;

use jiff::Timestamp;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::credentials::ServiceAccountKey;
use crate::error::{AppResult, DeliveryError};
use crate::external::client::HTTP_CLIENT;

/// OAuth scope for sending messages
pub const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// `urn:ietf:params:oauth:grant-type:jwt-bearer`, form encoded
const GRANT_TYPE: &str = "urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer";

/// Lifetime requested for each assertion, in seconds
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Cached tokens are refreshed this many seconds before they expire
const REFRESH_MARGIN_SECS: i64 = 60;

/// Claims of the signed assertion sent to the token endpoint
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Access token with its expiry as a Unix timestamp in seconds
#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: i64,
}

impl AccessToken {
    fn is_fresh_at(&self, now: i64) -> bool {
        now + REFRESH_MARGIN_SECS < self.expires_at
    }
}

/// Mints and caches access tokens for one service account
pub struct TokenSource {
    client_email: String,
    private_key_id: String,
    token_uri: String,
    encoding_key: EncodingKey,
    timeout: Duration,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    /// Builds a token source, failing if the private key cannot sign.
    pub fn new(key: &ServiceAccountKey, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client_email: key.client_email.clone(),
            private_key_id: key.private_key_id.clone(),
            token_uri: key.token_uri.clone(),
            encoding_key: key.encoding_key()?,
            timeout,
            cached: Mutex::new(None),
        })
    }

    /// Signs an assertion issued at `now` (Unix seconds).
    pub(crate) fn assertion(&self, now: i64) -> Result<String, DeliveryError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.private_key_id.clone());

        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: MESSAGING_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| DeliveryError::new(format!("Failed to sign token assertion: {}", e)))
    }

    /// Returns a valid access token, exchanging a new assertion when the
    /// cached one is missing or about to expire.
    ///
    /// The lock is held across the exchange so concurrent callers wait for
    /// one refresh instead of each starting their own.
    pub async fn access_token(&self) -> Result<String, DeliveryError> {
        let mut cached = self.cached.lock().await;
        let now = Timestamp::now().as_second();

        if let Some(token) = cached.as_ref()
            && token.is_fresh_at(now)
        {
            return Ok(token.value.clone());
        }

        let token = self.exchange(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn exchange(&self, now: i64) -> Result<AccessToken, DeliveryError> {
        let assertion = self.assertion(now)?;
        tracing::debug!(token_uri = %self.token_uri, "Requesting FCM access token");

        let response = HTTP_CLIENT
            .post(&self.token_uri)
            .timeout(self.timeout)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(format!("grant_type={}&assertion={}", GRANT_TYPE, assertion))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(body) => DeliveryError::new(format!(
                    "Failed to obtain access token: {}",
                    body.error_description.as_deref().unwrap_or(&body.error)
                ))
                .with_provider_status(body.error),
                Err(_) => DeliveryError::new(format!(
                    "Failed to obtain access token: HTTP {}",
                    status.as_u16()
                )),
            };
            return Err(error.with_status_code(status.as_u16()));
        }

        let body: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            DeliveryError::new(format!("Unexpected token endpoint response: {}", e))
                .with_status_code(status.as_u16())
        })?;

        tracing::debug!(expires_in = body.expires_in, "Obtained FCM access token");

        Ok(AccessToken {
            value: body.access_token,
            expires_at: now + body.expires_in,
        })
    }
}
