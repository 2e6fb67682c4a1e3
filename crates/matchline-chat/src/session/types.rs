//! Session wire types.

use std::fmt;

use matchline_common::SessionId;
use serde::{Deserialize, Serialize};

/// Server-reported lifecycle state of a session.
///
/// `Active` is the only non-terminal state. Transitions are driven by the
/// backend; the client only observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Closed,
    Expired,
    Completed,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }

    /// Closed and expired sessions end the conversation with an error;
    /// a completed one still delivers its final reply.
    pub fn ends_conversation(self) -> bool {
        matches!(self, Self::Closed | Self::Expired)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Expired => "expired",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /session/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub greeting: Option<String>,
}

/// A freshly created session as handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub id: SessionId,
    /// Opening line from the assistant, if the backend sent one.
    pub greeting: Option<String>,
}

/// Body of `GET /session/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    #[serde(alias = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub conversation_length: u32,
    #[serde(default)]
    pub message_count: u32,
    /// Requirements collected so far (free-form, backend owned).
    #[serde(default)]
    pub requirements: serde_json::Value,
    #[serde(default)]
    pub state: serde_json::Value,
    #[serde(default)]
    pub status: SessionStatus,
}
