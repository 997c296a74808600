//! Notification dispatch.
//!
//! Validates a request, hands it to the push provider once and logs the
//! outcome with the recipient token redacted.

use std::sync::Arc;

use super::provider::PushProvider;
use crate::error::{AppError, AppResult};
use crate::models::{DeliveryReceipt, DispatchStatus, NotificationRequest};

/// Number of token characters kept in log output
const REDACTED_TOKEN_CHARS: usize = 20;

/// Returns the first 20 characters of `token` followed by `...`.
///
/// The suffix is always appended so a logged token can never be mistaken for
/// a complete one.
pub fn redact_token(token: &str) -> String {
    let prefix: String = token.chars().take(REDACTED_TOKEN_CHARS).collect();
    format!("{}...", prefix)
}

/// Dispatch service wrapping the process-wide provider handle
#[derive(Clone)]
pub struct DispatchService {
    provider: Arc<dyn PushProvider>,
}

impl DispatchService {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn PushProvider> {
        &self.provider
    }

    /// Validates the raw fields and dispatches them.
    ///
    /// # Errors
    /// - `AppError::MissingField` when token, title or body is absent or empty;
    ///   the provider is not contacted
    /// - `AppError::Delivery` when the provider rejects the message or cannot
    ///   be reached
    pub async fn dispatch(
        &self,
        recipient_token: Option<String>,
        title: Option<String>,
        body: Option<String>,
    ) -> AppResult<DeliveryReceipt> {
        let request = NotificationRequest::new(recipient_token, title, body).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected notification request");
        })?;

        self.send(&request).await
    }

    /// Sends an already validated request. One provider call, no retry.
    pub async fn send(&self, request: &NotificationRequest) -> AppResult<DeliveryReceipt> {
        let token = redact_token(request.recipient_token());

        tracing::debug!(
            token = %token,
            provider = self.provider.name(),
            status = %DispatchStatus::Pending,
            "Dispatching notification"
        );

        match self.provider.send(request).await {
            Ok(receipt) => {
                tracing::info!(
                    token = %token,
                    title = request.title(),
                    body = request.body(),
                    message_id = %receipt.message_id,
                    status = %DispatchStatus::Delivered,
                    "Successfully sent notification"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(
                    token = %token,
                    error = %e,
                    provider_status = e.provider_status.as_deref(),
                    status = %DispatchStatus::Failed,
                    "Error sending notification"
                );
                Err(AppError::Delivery(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use proptest::prelude::*;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::error::DeliveryError;
    use crate::services::notifications::testing::StubProvider;

    const TOKEN: &str = "tok_ABC123DEF456GHI789JKL012";

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    fn service(stub: &Arc<StubProvider>) -> DispatchService {
        DispatchService::new(stub.clone())
    }

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_redact_token() {
        assert_eq!(redact_token(TOKEN), "tok_ABC123DEF456GHI7...");
        assert_eq!(redact_token("short"), "short...");
        assert_eq!(redact_token(""), "...");
    }

    #[test]
    fn test_redact_token_is_char_boundary_safe() {
        let token = "é".repeat(30);
        assert_eq!(redact_token(&token), format!("{}...", "é".repeat(20)));
    }

    #[tokio::test]
    async fn test_dispatch_success_logs_redacted_token() {
        let (logs, _guard) = capture_logs();
        let stub = Arc::new(StubProvider::succeeding("projects/demo/messages/1"));

        let receipt = service(&stub)
            .dispatch(some(TOKEN), some("Hello"), some("World"))
            .await
            .unwrap();

        assert_eq!(receipt.message_id, "projects/demo/messages/1");
        assert_eq!(stub.calls(), 1);

        let output = logs.contents();
        assert!(output.contains("Successfully sent notification"));
        assert!(output.contains("tok_ABC123DEF456GHI7..."));
        assert!(output.contains("title=\"Hello\""));
        assert!(output.contains("body=\"World\""));
        assert!(!output.contains(TOKEN));
    }

    #[tokio::test]
    async fn test_dispatch_empty_token_never_calls_provider() {
        let stub = Arc::new(StubProvider::succeeding("unused"));

        let err = service(&stub)
            .dispatch(some(""), some("Hello"), some("World"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingField { field: "token" }));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_provider_failure_is_logged_once() {
        let (logs, _guard) = capture_logs();
        let stub = Arc::new(StubProvider::failing(
            DeliveryError::new("Requested entity was not found.")
                .with_status_code(404)
                .with_provider_status("NOT_FOUND"),
        ));

        let err = service(&stub)
            .dispatch(some(TOKEN), some("Hello"), some("World"))
            .await
            .unwrap_err();

        match err {
            AppError::Delivery(e) => assert_eq!(e.message, "Requested entity was not found."),
            other => panic!("Expected Delivery error, got {:?}", other),
        }
        assert_eq!(stub.calls(), 1);

        let output = logs.contents();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Requested entity was not found."));
        assert!(output.contains("tok_ABC123DEF456GHI7..."));
        assert!(!output.contains(TOKEN));
    }

    #[tokio::test]
    async fn test_dispatch_is_not_deduplicated() {
        let stub = Arc::new(StubProvider::succeeding("id"));
        let service = service(&stub);

        for _ in 0..2 {
            service
                .dispatch(some(TOKEN), some("Hello"), some("World"))
                .await
                .unwrap();
        }

        assert_eq!(stub.calls(), 2);
    }

    fn arb_field() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[ -~]{1,40}".prop_map(Some),
        ]
    }

    fn is_present(field: &Option<String>) -> bool {
        field.as_deref().is_some_and(|v| !v.is_empty())
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    proptest! {
        #[test]
        fn prop_incomplete_requests_never_reach_provider(
            token in arb_field(),
            title in arb_field(),
            body in arb_field(),
        ) {
            prop_assume!(!(is_present(&token) && is_present(&title) && is_present(&body)));

            let stub = Arc::new(StubProvider::succeeding("unused"));
            let result = block_on(service(&stub).dispatch(token, title, body));

            prop_assert!(
                matches!(result, Err(AppError::MissingField { .. })),
                "expected MissingField, got {:?}",
                result
            );
            prop_assert_eq!(stub.calls(), 0);
        }

        #[test]
        fn prop_complete_requests_reach_provider_exactly_once(
            token in "[ -~]{1,60}",
            title in "[ -~]{1,40}",
            body in "[ -~]{1,80}",
        ) {
            let stub = Arc::new(StubProvider::succeeding("id"));
            let result = block_on(service(&stub).dispatch(
                Some(token.clone()),
                Some(title.clone()),
                Some(body.clone()),
            ));

            prop_assert!(result.is_ok());
            prop_assert_eq!(stub.calls(), 1);
            let received = stub.received();
            prop_assert_eq!(received[0].recipient_token(), token.as_str());
            prop_assert_eq!(received[0].title(), title.as_str());
            prop_assert_eq!(received[0].body(), body.as_str());
        }

        #[test]
        fn prop_provider_failures_are_not_retried(token in "[ -~]{1,60}") {
            let stub = Arc::new(StubProvider::failing(DeliveryError::new("quota exceeded")));
            let result = block_on(service(&stub).dispatch(
                Some(token),
                Some("Hello".to_string()),
                Some("World".to_string()),
            ));

            prop_assert!(
                matches!(result, Err(AppError::Delivery(_))),
                "expected Delivery, got {:?}",
                result
            );
            prop_assert_eq!(stub.calls(), 1);
        }
    }
}
