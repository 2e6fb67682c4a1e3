//! HTTP transport configuration.

use std::time::Duration;

/// Default backend address when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings for [`HttpTransport`](super::HttpTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub base_url: String,
    /// Budget for the whole call; the only cancellation mechanism.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Keep cookies issued by the backend and send them back.
    pub send_credentials: bool,
}

impl TransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(40),
            connect_timeout: Duration::from_secs(10),
            send_credentials: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_credentials(mut self, send: bool) -> Self {
        self.send_credentials = send;
        self
    }

    /// Join the base address and an absolute path without doubling slashes.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
