//! Service health probe types.

use serde::{Deserialize, Serialize};

/// Session counters reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    #[serde(default, alias = "total_sessions")]
    pub total: u64,
    #[serde(default, alias = "active_sessions")]
    pub active: u64,
    #[serde(default, alias = "closed_sessions")]
    pub closed: u64,
    #[serde(default, alias = "completed_sessions")]
    pub completed: u64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub database_loaded: Option<bool>,
    #[serde(default)]
    pub sessions: SessionStats,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
