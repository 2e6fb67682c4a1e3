//! reqwest-backed [`Transport`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use matchline_common::new_correlation_id;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::config::TransportConfig;
use super::{server_message, Method, Transport, TransportFailure, TransportResponse};
use crate::ClassifiedError;

/// Called with the request path whenever the backend answers 401.
///
/// Observational only: the response is still reported as a failure and
/// nothing is retried.
pub type UnauthorizedHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Longest raw (non-JSON) error body kept as a failure message.
const MAX_RAW_MESSAGE: usize = 200;

/// JSON-over-HTTP transport with a fixed base address and timeout.
pub struct HttpTransport {
    pub(crate) config: TransportConfig,
    pub(crate) http: reqwest::Client,
    on_unauthorized: UnauthorizedHook,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, ClassifiedError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .cookie_store(config.send_credentials)
            .build()
            .map_err(TransportFailure::from)?;

        Ok(Self {
            config,
            http,
            on_unauthorized: Arc::new(|path: &str| {
                warn!(path, "session expired or unauthorized");
            }),
        })
    }

    /// Replace the default 401 hook (which logs a warning).
    pub fn with_unauthorized_hook(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Arc::new(hook);
        self
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<TransportResponse, TransportFailure> {
        let url = self.config.url_for(path);
        let correlation_id = new_correlation_id();
        debug!(%method, %url, %correlation_id, "chat service request");

        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%correlation_id, error = %e, "chat service request failed");
            TransportFailure::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            (self.on_unauthorized)(path);
        }

        let text = match response.text().await {
            Ok(text) => text,
            // The status alone still classifies an error response.
            Err(e) if !status.is_success() => {
                debug!(%correlation_id, error = %e, "error body unreadable");
                return Err(TransportFailure::status(status.as_u16(), None));
            }
            Err(e) => return Err(TransportFailure::from(e)),
        };
        debug!(%correlation_id, status = status.as_u16(), bytes = text.len(), "chat service response");

        if !status.is_success() {
            return Err(TransportFailure::status(
                status.as_u16(),
                failure_message(&text),
            ));
        }

        let data = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| TransportFailure::decode(format!("invalid JSON response: {e}")))?
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            data,
        })
    }
}

/// Extract a message from an error body, JSON or not.
fn failure_message(text: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(data) => server_message(&data),
        Err(_) => {
            let raw: String = text.trim().chars().take(MAX_RAW_MESSAGE).collect();
            (!raw.is_empty()).then_some(raw)
        }
    }
}
