//! In-memory transport double for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::transport::{FailureCode, Method, Transport, TransportFailure, TransportResponse};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Replays queued replies in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, TransportFailure>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, data: serde_json::Value) {
        self.replies.lock().unwrap().push_back(Ok(TransportResponse { status: 200, data }));
    }

    pub fn push_err(&self, failure: TransportFailure) {
        self.replies.lock().unwrap().push_back(Err(failure));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<TransportResponse, TransportFailure> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(TransportFailure::network(
                FailureCode::Connect,
                "no scripted reply",
            ))
        })
    }
}
