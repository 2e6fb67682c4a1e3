//! Session creation, inspection and best-effort deletion.

use std::fmt;
use std::sync::Arc;

use matchline_common::SessionId;
use tracing::{debug, error, info, warn};

use super::tracker::TerminalTracker;
use super::types::{CreateSessionResponse, NewSession, SessionMeta};
use crate::endpoints::Endpoints;
use crate::transport::{Method, Transport, TransportFailure};
use crate::{classify, ClassifiedError};

/// Receives deletion failures that were swallowed.
pub type DeleteObserver = Arc<dyn Fn(&str, &ClassifiedError) + Send + Sync>;

/// Owns the create / delete side of the session lifecycle.
///
/// Holds no registry of sessions: every call site threads its own id.
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    tracker: Option<TerminalTracker>,
    on_delete_failure: Option<DeleteObserver>,
}

impl SessionManager {
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            tracker: None,
            on_delete_failure: None,
        }
    }

    /// Share a terminal-status cache with the message exchange.
    pub fn with_tracker(mut self, tracker: TerminalTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn with_delete_observer(
        mut self,
        observer: impl Fn(&str, &ClassifiedError) + Send + Sync + 'static,
    ) -> Self {
        self.on_delete_failure = Some(Arc::new(observer));
        self
    }

    /// Ask the backend for a new session.
    ///
    /// A success response without a session id is a protocol violation
    /// and fails unrecoverably rather than yielding an empty id.
    pub async fn create(&self) -> Result<NewSession, ClassifiedError> {
        let response = self
            .transport
            .request(Method::Post, &self.endpoints.create_session(), None)
            .await?;

        let body: CreateSessionResponse = serde_json::from_value(response.data).map_err(|e| {
            classify(&TransportFailure::decode(format!(
                "malformed create-session response: {e}"
            )))
        })?;

        let Some(id) = body.session_id.filter(|id| !id.trim().is_empty()) else {
            error!("session service returned no session id");
            return Err(ClassifiedError::protocol_violation(
                "session service returned no session id",
            ));
        };

        info!(session_id = %id, "session created");
        Ok(NewSession {
            id: SessionId::new(id),
            greeting: body.greeting.filter(|g| !g.trim().is_empty()),
        })
    }

    /// Delete a session, best effort.
    ///
    /// An empty id is a no-op. Transport failures are logged and passed to
    /// the delete observer but never returned: cleanup must not block the
    /// caller.
    pub async fn remove(&self, session_id: &str) {
        if session_id.trim().is_empty() {
            debug!("delete skipped: no session id");
            return;
        }

        if let Some(tracker) = &self.tracker {
            tracker.forget(session_id).await;
        }

        match self
            .transport
            .request(Method::Delete, &self.endpoints.session(session_id), None)
            .await
        {
            Ok(_) => info!(session_id, "session deleted"),
            Err(failure) => {
                let err = classify(&failure);
                warn!(session_id, error = %err, "failed to delete session");
                if let Some(observer) = &self.on_delete_failure {
                    observer(session_id, &err);
                }
            }
        }
    }

    /// Fetch session metadata. Same id precondition as sending a turn.
    pub async fn info(&self, session_id: &str) -> Result<SessionMeta, ClassifiedError> {
        if session_id.trim().is_empty() {
            return Err(ClassifiedError::missing_session_id());
        }

        let response = self
            .transport
            .request(Method::Get, &self.endpoints.session(session_id), None)
            .await?;

        let meta: SessionMeta = serde_json::from_value(response.data).map_err(|e| {
            classify(&TransportFailure::decode(format!(
                "malformed session info response: {e}"
            )))
        })?;

        if let Some(tracker) = &self.tracker {
            tracker.record(session_id, meta.status).await;
        }
        Ok(meta)
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("endpoints", &self.endpoints)
            .field("tracking", &self.tracker.is_some())
            .finish_non_exhaustive()
    }
}
