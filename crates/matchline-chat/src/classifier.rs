//! Maps raw transport failures onto the [`ClassifiedError`] taxonomy.
//!
//! Rules are checked in order and the first match wins:
//!
//! 1. timeout (code or message text) -> `SERVER_ERROR`, recoverable
//! 2. 401 / 403 -> `SESSION_EXPIRED`
//! 3. 404 -> `SERVER_ERROR`, not recoverable
//! 4. 400 -> `INVALID_INPUT`, recoverable, server message when present
//! 5. 429 -> `RATE_LIMITED`, recoverable
//! 6. 5xx -> `SERVER_ERROR`, recoverable
//! 7. no status -> `SERVER_ERROR`, recoverable, raw message when present
//!
//! Any other status lands in a final `SERVER_ERROR`, not recoverable, so
//! every input has exactly one outcome.

use crate::error::{ClassifiedError, ErrorCode};
use crate::transport::{FailureCode, TransportFailure};

pub const TIMEOUT_MESSAGE: &str = "request timeout, try again";
const SESSION_EXPIRED_MESSAGE: &str = "session expired, please start a new conversation";
const NOT_FOUND_MESSAGE: &str = "chat service unavailable (endpoint not found)";
const INVALID_INPUT_MESSAGE: &str = "invalid request";
const RATE_LIMITED_MESSAGE: &str = "too many requests, please slow down";
const SERVER_ERROR_MESSAGE: &str = "server error, try again";
const NETWORK_ERROR_MESSAGE: &str = "network error, try again";

/// Classify a transport failure. Pure and total.
pub fn classify(failure: &TransportFailure) -> ClassifiedError {
    if is_timeout(failure) {
        return ClassifiedError::new(ErrorCode::ServerError, TIMEOUT_MESSAGE, true);
    }

    let Some(status) = failure.status else {
        let message = failure
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(NETWORK_ERROR_MESSAGE);
        return ClassifiedError::new(ErrorCode::ServerError, message, true);
    };

    match status {
        401 | 403 => ClassifiedError::new(ErrorCode::SessionExpired, SESSION_EXPIRED_MESSAGE, false),
        404 => ClassifiedError::new(ErrorCode::ServerError, NOT_FOUND_MESSAGE, false),
        400 => ClassifiedError::new(
            ErrorCode::InvalidInput,
            failure
                .message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(INVALID_INPUT_MESSAGE),
            true,
        ),
        429 => ClassifiedError::new(ErrorCode::RateLimited, RATE_LIMITED_MESSAGE, true),
        500.. => ClassifiedError::new(ErrorCode::ServerError, SERVER_ERROR_MESSAGE, true),
        other => ClassifiedError::new(
            ErrorCode::ServerError,
            format!("unexpected response from chat service (HTTP {other})"),
            false,
        ),
    }
}

fn is_timeout(failure: &TransportFailure) -> bool {
    if failure.code == Some(FailureCode::Timeout) {
        return true;
    }
    failure.message.as_deref().is_some_and(|m| {
        let lower = m.to_ascii_lowercase();
        lower.contains("timeout") || lower.contains("timed out")
    })
}

impl From<TransportFailure> for ClassifiedError {
    fn from(failure: TransportFailure) -> Self {
        classify(&failure)
    }
}
