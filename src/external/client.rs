use std::sync::LazyLock;
use std::time::Duration;

/// User-Agent sent with every outbound request
pub const USER_AGENT: &str = concat!("push-relay/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance
///
/// Initialized lazily on first access and reused across the application, so
/// token exchanges and sends share one connection pool.
///
/// # Features
/// - **Compression**: gzip responses are decoded transparently
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```rust,ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// async fn fetch_data() -> Result<String, reqwest::Error> {
///     HTTP_CLIENT
///         .get("https://fcm.googleapis.com/")
///         .send()
///         .await?
///         .text()
///         .await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
