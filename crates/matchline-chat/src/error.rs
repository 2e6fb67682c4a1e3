//! The normalized error value every core operation fails with.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable error taxonomy shown to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transient or infrastructural: timeout, 5xx, unreachable endpoint, network failure.
    ServerError,
    /// The session cannot continue; a new one must be created.
    SessionExpired,
    /// Caller-correctable input problem.
    InvalidInput,
    /// The caller should back off before retrying.
    RateLimited,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServerError => "SERVER_ERROR",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::InvalidInput => "INVALID_INPUT",
            Self::RateLimited => "RATE_LIMITED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure that has already been classified.
///
/// `recoverable` tells the caller whether the same operation may be retried
/// as-is. A non-recoverable error means the session has to be re-created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ClassifiedError {
    pub code: ErrorCode,
    /// Human-readable, safe to display.
    pub message: String,
    pub recoverable: bool,
}

impl ClassifiedError {
    pub fn new(code: ErrorCode, message: impl Into<String>, recoverable: bool) -> Self {
        Self {
            code,
            message: message.into(),
            recoverable,
        }
    }

    pub fn missing_session_id() -> Self {
        Self::new(ErrorCode::InvalidInput, "session id missing", false)
    }

    pub fn empty_message() -> Self {
        Self::new(ErrorCode::InvalidInput, "message cannot be empty", true)
    }

    pub fn empty_refinement_field() -> Self {
        Self::new(
            ErrorCode::InvalidInput,
            "refinement field cannot be empty",
            true,
        )
    }

    /// The backend reported the session closed or expired.
    pub fn session_ended() -> Self {
        Self::new(
            ErrorCode::SessionExpired,
            "this conversation has ended, please start a new session",
            false,
        )
    }

    /// The backend answered successfully but broke the response contract.
    pub fn protocol_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServerError, message, false)
    }

    /// True if the session must be re-created before continuing.
    pub fn requires_new_session(&self) -> bool {
        !self.recoverable
    }
}
