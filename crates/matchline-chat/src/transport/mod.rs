//! Request/response transport consumed by the session client.
//!
//! The core only depends on the [`Transport`] trait. [`HttpTransport`] is
//! the reqwest-backed implementation used by the binary; tests substitute
//! an in-memory double.

mod config;
mod http;


use std::fmt;

use async_trait::async_trait;

pub use config::TransportConfig;
pub use http::{HttpTransport, UnauthorizedHook};

/// HTTP methods used by the chat endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// A successful (2xx) response with its decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub data: serde_json::Value,
}

/// Transport-level failure kind, independent of any HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCode {
    /// The request exceeded its time budget.
    Timeout,
    /// No connection could be established.
    Connect,
    /// The body could not be decoded.
    Decode,
    /// Any other failure while building or sending the request.
    Request,
}

/// A raw, unclassified failure.
///
/// Never leaves the crate as-is: it is turned into a
/// [`ClassifiedError`](crate::ClassifiedError) by [`classify`](crate::classify).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportFailure {
    pub status: Option<u16>,
    pub code: Option<FailureCode>,
    pub message: Option<String>,
}

impl TransportFailure {
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self {
            status: Some(status),
            code: None,
            message,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: Some(FailureCode::Timeout),
            message: Some(message.into()),
        }
    }

    pub fn network(code: FailureCode, message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: Some(code),
            message: Some(message.into()),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::network(FailureCode::Decode, message)
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_connect() {
            Self::network(FailureCode::Connect, format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self {
                status: err.status().map(|s| s.as_u16()),
                code: Some(FailureCode::Request),
                message: Some(err.to_string()),
            }
        }
    }
}

/// Generic JSON request/response capability.
///
/// Implementations own the base address, timeout and credential handling.
/// Non-2xx responses are reported as `Err` with the status filled in.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<TransportResponse, TransportFailure>;
}

/// Pull a human-readable message out of an error body.
///
/// Understands FastAPI's `detail` (string or `{message}`), plus plain
/// `message` and `error` fields.
pub(crate) fn server_message(data: &serde_json::Value) -> Option<String> {
    let detail = &data["detail"];
    let found = detail
        .as_str()
        .or_else(|| detail["message"].as_str())
        .or_else(|| data["message"].as_str())
        .or_else(|| data["error"].as_str())?;
    let trimmed = found.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
