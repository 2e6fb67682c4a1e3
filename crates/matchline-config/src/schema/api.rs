use serde::{Deserialize, Serialize};

/// Where and how to reach the chat service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address of the backend, without the API prefix.
    pub base_url: String,
    /// Path prefix prepended to every session endpoint.
    pub api_prefix: String,
    /// Total budget for one request, in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Keep and resend cookies issued by the backend.
    pub send_credentials: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            api_prefix: "/api/v1".into(),
            timeout_secs: 40,
            connect_timeout_secs: 10,
            send_credentials: true,
        }
    }
}
