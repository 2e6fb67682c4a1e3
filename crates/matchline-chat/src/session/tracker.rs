//! Optional last-seen status cache.
//!
//! When enabled, ids observed in a terminal state are refused locally so a
//! dead session never costs another round trip.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::types::SessionStatus;

/// Thread-safe map of session id to the terminal status it was last seen in.
#[derive(Clone, Default)]
pub struct TerminalTracker {
    terminal: Arc<RwLock<HashMap<String, SessionStatus>>>,
}

impl TerminalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed status. Active ids are not kept.
    pub async fn record(&self, session_id: &str, status: SessionStatus) {
        let mut map = self.terminal.write().await;
        if status.is_terminal() {
            debug!(session_id, %status, "session reached terminal status");
            map.insert(session_id.to_string(), status);
        } else {
            map.remove(session_id);
        }
    }

    /// Terminal status previously seen for this id, if any.
    pub async fn terminal_status(&self, session_id: &str) -> Option<SessionStatus> {
        self.terminal.read().await.get(session_id).copied()
    }

    pub async fn forget(&self, session_id: &str) {
        self.terminal.write().await.remove(session_id);
    }

    /// Number of ids currently known to be terminal.
    pub async fn count(&self) -> usize {
        self.terminal.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_only_terminal_statuses() {
        let tracker = TerminalTracker::new();
        tracker.record("a", SessionStatus::Active).await;
        tracker.record("b", SessionStatus::Closed).await;
        tracker.record("c", SessionStatus::Completed).await;

        assert_eq!(tracker.terminal_status("a").await, None);
        assert_eq!(tracker.terminal_status("b").await, Some(SessionStatus::Closed));
        assert_eq!(tracker.terminal_status("c").await, Some(SessionStatus::Completed));
        assert_eq!(tracker.count().await, 2);
    }

    #[tokio::test]
    async fn forget_drops_entry() {
        let tracker = TerminalTracker::new();
        tracker.record("b", SessionStatus::Expired).await;
        tracker.forget("b").await;
        assert_eq!(tracker.terminal_status("b").await, None);
        assert_eq!(tracker.count().await, 0);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let tracker = TerminalTracker::new();
        let other = tracker.clone();
        tracker.record("x", SessionStatus::Closed).await;
        assert_eq!(other.terminal_status("x").await, Some(SessionStatus::Closed));
    }
}
