//! Chat turn payload normalization.

use serde::{Deserialize, Serialize};

use crate::creators::{self, Creator};
use crate::session::SessionStatus;

/// Raw body of a chat or refine call, as the backend sends it.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatTurnPayload {
    #[serde(default, alias = "sessionId")]
    session_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
    /// Some payload variants carry the reply here instead of `message`.
    #[serde(default, alias = "agentResponse")]
    agent_response: Option<String>,
    #[serde(default, alias = "conversationLength")]
    conversation_length: Option<u32>,
    #[serde(default, alias = "hasResults", deserialize_with = "crate::de::or_default")]
    has_results: bool,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    creators: Option<Vec<Creator>>,
    #[serde(default, deserialize_with = "crate::de::or_default")]
    metadata: serde_json::Map<String, serde_json::Value>,
}

/// Read only the session status from a raw reply.
///
/// Absent or null reads as active. An unknown status string is an error.
pub(crate) fn read_status(data: &serde_json::Value) -> Result<SessionStatus, serde_json::Error> {
    let raw = data
        .get("session_status")
        .or_else(|| data.get("sessionStatus"))
        .filter(|v| !v.is_null());
    match raw {
        Some(value) => SessionStatus::deserialize(value),
        None => Ok(SessionStatus::default()),
    }
}

impl ChatTurnPayload {
    /// Fold `agent_response` into `message` so callers see one field, and
    /// pull out any creator results.
    pub(crate) fn normalize(self, session_status: SessionStatus) -> ChatTurnResponse {
        let message = self.agent_response.or(self.message).unwrap_or_default();

        let creators = match self.creators {
            Some(list) if !list.is_empty() => list,
            _ => creators::extract_creators(&message),
        };

        ChatTurnResponse {
            session_id: self.session_id,
            has_results: self.has_results || !creators.is_empty(),
            message,
            session_status,
            conversation_length: self.conversation_length,
            creators,
            metadata: self.metadata,
        }
    }
}

/// One assistant reply, normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurnResponse {
    pub session_id: Option<String>,
    /// Canonical reply text.
    pub message: String,
    pub session_status: SessionStatus,
    pub conversation_length: Option<u32>,
    pub has_results: bool,
    pub creators: Vec<Creator>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ChatTurnResponse {
    /// Reply text with any creators block removed.
    pub fn display_text(&self) -> String {
        creators::strip_creators_block(&self.message)
    }

    /// The session will not accept further turns.
    pub fn is_final(&self) -> bool {
        self.session_status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn normalize(value: serde_json::Value) -> ChatTurnResponse {
        let status = read_status(&value).unwrap();
        serde_json::from_value::<ChatTurnPayload>(value)
            .unwrap()
            .normalize(status)
    }

    #[test]
    fn agent_response_overwrites_message() {
        let turn = normalize(json!({
            "message": "hi",
            "agent_response": "hello there",
            "session_status": "active"
        }));
        assert_eq!(turn.message, "hello there");
        assert_eq!(turn.session_status, SessionStatus::Active);
    }

    #[test]
    fn camel_case_variant_is_accepted() {
        let turn = normalize(json!({
            "message": "hi",
            "agentResponse": "hello there",
            "sessionStatus": "completed"
        }));
        assert_eq!(turn.message, "hello there");
        assert!(turn.is_final());
    }

    #[test]
    fn message_kept_when_no_agent_response() {
        let turn = normalize(json!({ "message": "reply", "session_status": "active" }));
        assert_eq!(turn.message, "reply");
        assert!(!turn.is_final());
    }

    #[test]
    fn missing_status_reads_as_active() {
        let turn = normalize(json!({ "message": "reply" }));
        assert_eq!(turn.session_status, SessionStatus::Active);
    }

    #[test]
    fn creators_pulled_from_reply_block() {
        let turn = normalize(json!({
            "message": "Find me someone",
            "agent_response": "Two matches!\n<<<CREATORS_JSON_START>>>[{\"id\":\"v1\",\"name\":\"Ana\"},{\"id\":\"v2\",\"name\":\"Bo\"}]<<<CREATORS_JSON_END>>>",
            "session_status": "active",
            "has_results": true
        }));
        assert!(turn.has_results);
        assert_eq!(turn.creators.len(), 2);
        assert_eq!(turn.display_text(), "Two matches!");
    }

    #[test]
    fn explicit_creators_array_wins() {
        let turn = normalize(json!({
            "message": "ok",
            "session_status": "active",
            "creators": [{ "id": "x", "name": "Xia" }]
        }));
        assert_eq!(turn.creators.len(), 1);
        assert_eq!(turn.creators[0].name, "Xia");
        assert!(turn.has_results);
    }

    #[test]
    fn metadata_is_carried_through() {
        let turn = normalize(json!({
            "agent_response": "noted",
            "session_status": "active",
            "conversation_length": 4,
            "metadata": { "requirements_complete": false, "message_count": 2 }
        }));
        assert_eq!(turn.conversation_length, Some(4));
        assert_eq!(turn.metadata["message_count"], 2);
    }

    #[test]
    fn status_read_from_either_spelling() {
        assert_eq!(
            read_status(&json!({ "session_status": "closed" })).unwrap(),
            SessionStatus::Closed
        );
        assert_eq!(
            read_status(&json!({ "sessionStatus": "expired" })).unwrap(),
            SessionStatus::Expired
        );
        assert_eq!(
            read_status(&json!({ "session_status": null })).unwrap(),
            SessionStatus::Active
        );
        assert!(read_status(&json!({ "session_status": "paused" })).is_err());
    }
}
