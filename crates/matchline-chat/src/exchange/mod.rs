//! One validated request/response chat turn against an existing session.
//!
//! Turns on the same session are not serialized here. Two overlapping
//! `send` calls may be answered in any order; callers that need ordering
//! must queue turns per session themselves.

mod response;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

pub use response::ChatTurnResponse;

use self::response::{read_status, ChatTurnPayload};
use crate::endpoints::Endpoints;
use crate::session::TerminalTracker;
use crate::transport::{Method, Transport, TransportFailure};
use crate::{classify, ClassifiedError};

/// Sends chat turns and applies the session-status policy to each reply.
pub struct MessageExchange {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    tracker: Option<TerminalTracker>,
}

impl MessageExchange {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            tracker: None,
        }
    }

    /// Refuse turns on ids already seen in a terminal state.
    pub fn with_tracker(mut self, tracker: TerminalTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Send one user message.
    ///
    /// The message is trimmed before validation and transmission. A reply
    /// reporting the session closed or expired is turned into
    /// `SESSION_EXPIRED` even though the call itself succeeded.
    pub async fn send(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ChatTurnResponse, ClassifiedError> {
        self.check_session(session_id).await?;

        let message = message.trim();
        if message.is_empty() {
            return Err(ClassifiedError::empty_message());
        }

        debug!(session_id, chars = message.chars().count(), "sending chat turn");
        let body = serde_json::json!({ "message": message });
        self.turn(session_id, self.endpoints.chat(session_id), body)
            .await
    }

    /// Change one collected requirement; the backend re-runs the search.
    pub async fn refine(
        &self,
        session_id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<ChatTurnResponse, ClassifiedError> {
        self.check_session(session_id).await?;

        let field = field.trim();
        if field.is_empty() {
            return Err(ClassifiedError::empty_refinement_field());
        }

        debug!(session_id, field, "sending refinement");
        let body = serde_json::json!({ "field": field, "value": value });
        self.turn(session_id, self.endpoints.refine(session_id), body)
            .await
    }

    /// Preconditions shared by every turn. Never touches the network.
    async fn check_session(&self, session_id: &str) -> Result<(), ClassifiedError> {
        if session_id.trim().is_empty() {
            return Err(ClassifiedError::missing_session_id());
        }
        if let Some(tracker) = &self.tracker {
            if let Some(status) = tracker.terminal_status(session_id).await {
                debug!(session_id, %status, "refusing turn on terminal session");
                return Err(ClassifiedError::session_ended());
            }
        }
        Ok(())
    }

    async fn turn(
        &self,
        session_id: &str,
        path: String,
        body: serde_json::Value,
    ) -> Result<ChatTurnResponse, ClassifiedError> {
        let response = self
            .transport
            .request(Method::Post, &path, Some(body))
            .await
            .map_err(|failure| {
                let err = classify(&failure);
                warn!(session_id, error = %err, "chat turn failed");
                err
            })?;

        // Status first; enrichment fields are decoded afterwards.
        let status = read_status(&response.data).map_err(|e| {
            classify(&TransportFailure::decode(format!(
                "malformed chat response: {e}"
            )))
        })?;

        if let Some(tracker) = &self.tracker {
            tracker.record(session_id, status).await;
        }

        if status.ends_conversation() {
            info!(session_id, %status, "session ended by service");
            return Err(ClassifiedError::session_ended());
        }

        let payload: ChatTurnPayload = serde_json::from_value(response.data).map_err(|e| {
            classify(&TransportFailure::decode(format!(
                "malformed chat response: {e}"
            )))
        })?;

        Ok(payload.normalize(status))
    }
}

impl fmt::Debug for MessageExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageExchange")
            .field("endpoints", &self.endpoints)
            .field("tracking", &self.tracker.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
