//! Caller-facing facade over session management and message exchange.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::endpoints::{Endpoints, DEFAULT_API_PREFIX};
use crate::exchange::{ChatTurnResponse, MessageExchange};
use crate::health::HealthReport;
use crate::session::{NewSession, SessionManager, SessionMeta, TerminalTracker};
use crate::transport::{Method, Transport, TransportFailure};
use crate::{classify, ClassifiedError};

/// Client behavior knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub api_prefix: String,
    /// Cache terminal statuses and refuse turns on those ids locally.
    pub track_terminal_status: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            track_terminal_status: false,
        }
    }
}

/// Creates sessions, exchanges turns and cleans up, returning only
/// [`ClassifiedError`]s on failure.
pub struct ChatClient {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    sessions: SessionManager,
    exchange: MessageExchange,
}

impl ChatClient {
    pub fn new(transport: Arc<dyn Transport>, options: ClientOptions) -> Self {
        let endpoints = Endpoints::new(options.api_prefix);
        let mut sessions = SessionManager::new(Arc::clone(&transport), endpoints.clone());
        let mut exchange = MessageExchange::new(Arc::clone(&transport), endpoints.clone());

        if options.track_terminal_status {
            let tracker = TerminalTracker::new();
            sessions = sessions.with_tracker(tracker.clone());
            exchange = exchange.with_tracker(tracker);
        }

        Self {
            transport,
            endpoints,
            sessions,
            exchange,
        }
    }

    /// Observe deletion failures that [`delete_session`](Self::delete_session) swallows.
    pub fn with_delete_observer(
        mut self,
        observer: impl Fn(&str, &ClassifiedError) + Send + Sync + 'static,
    ) -> Self {
        self.sessions = self.sessions.with_delete_observer(observer);
        self
    }

    pub async fn create_session(&self) -> Result<NewSession, ClassifiedError> {
        self.sessions.create().await
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ChatTurnResponse, ClassifiedError> {
        self.exchange.send(session_id, text).await
    }

    pub async fn refine(
        &self,
        session_id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<ChatTurnResponse, ClassifiedError> {
        self.exchange.refine(session_id, field, value).await
    }

    pub async fn get_session_info(&self, session_id: &str) -> Result<SessionMeta, ClassifiedError> {
        self.sessions.info(session_id).await
    }

    /// Best effort; never fails.
    pub async fn delete_session(&self, session_id: &str) {
        self.sessions.remove(session_id).await;
    }

    pub async fn health(&self) -> Result<HealthReport, ClassifiedError> {
        let response = self
            .transport
            .request(Method::Get, &self.endpoints.health(), None)
            .await?;
        debug!(status = response.status, "health probe answered");
        serde_json::from_value(response.data).map_err(|e| {
            classify(&TransportFailure::decode(format!(
                "malformed health response: {e}"
            )))
        })
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("sessions", &self.sessions)
            .field("exchange", &self.exchange)
            .finish_non_exhaustive()
    }
}
