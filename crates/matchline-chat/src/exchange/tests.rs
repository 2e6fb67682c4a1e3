use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::session::SessionStatus;
use crate::testing::ScriptedTransport;
use crate::ErrorCode;

fn exchange(transport: &Arc<ScriptedTransport>) -> MessageExchange {
    MessageExchange::new(transport.clone(), Endpoints::default())
}

#[tokio::test]
async fn empty_session_id_fails_without_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let err = exchange(&transport).send("", "hello").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(!err.recoverable);
    assert_eq!(err.message, "session id missing");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn whitespace_message_fails_without_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let err = exchange(&transport).send("sess-1", "   ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(err.recoverable);
    assert_eq!(err.message, "message cannot be empty");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn session_id_is_checked_before_message() {
    let transport = Arc::new(ScriptedTransport::new());
    let err = exchange(&transport).send("  ", "").await.unwrap_err();
    assert_eq!(err, ClassifiedError::missing_session_id());
}

#[tokio::test]
async fn message_is_trimmed_before_sending() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "Great, where?", "session_status": "active" }));

    exchange(&transport)
        .send("sess-1", "  I need a videographer \n")
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::Post);
    assert_eq!(calls[0].path, "/api/v1/session/sess-1/chat");
    assert_eq!(calls[0].body, Some(json!({ "message": "I need a videographer" })));
}

#[tokio::test]
async fn agent_response_overwrites_message() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({
        "message": "hi",
        "agent_response": "hello there",
        "session_status": "active"
    }));

    let turn = exchange(&transport).send("sess-1", "hi").await.unwrap();
    assert_eq!(turn.message, "hello there");
    assert_eq!(turn.session_status, SessionStatus::Active);
}

#[tokio::test]
async fn closed_status_raises_session_expired() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({
        "message": "hi",
        "agent_response": "This session has been closed. Please create a new session to continue.",
        "session_status": "closed"
    }));

    let err = exchange(&transport).send("sess-1", "hi").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SessionExpired);
    assert!(!err.recoverable);
}

#[tokio::test]
async fn expired_status_raises_session_expired() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "bye", "session_status": "expired" }));

    let err = exchange(&transport).send("sess-1", "hi").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SessionExpired);
    assert!(!err.recoverable);
}

#[tokio::test]
async fn completed_status_still_returns_reply() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "All done, enjoy!", "session_status": "completed" }));

    let turn = exchange(&transport).send("sess-1", "thanks").await.unwrap();
    assert_eq!(turn.message, "All done, enjoy!");
    assert!(turn.is_final());
}

#[tokio::test]
async fn transport_failure_is_classified() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_err(TransportFailure::status(429, None));

    let err = exchange(&transport).send("sess-1", "hi").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RateLimited);
    assert!(err.recoverable);
}

#[tokio::test]
async fn timeout_is_recoverable() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_err(TransportFailure::timeout("operation timed out"));

    let err = exchange(&transport).send("sess-1", "hi").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ServerError);
    assert!(err.recoverable);
    assert_eq!(err.message, crate::classifier::TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn server_side_validation_message_surfaces() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_err(TransportFailure::status(
        400,
        Some("Message cannot be empty".into()),
    ));

    let err = exchange(&transport).send("sess-1", "x").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, "Message cannot be empty");
}

#[tokio::test]
async fn malformed_payload_is_recoverable_server_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "x", "session_status": "paused" }));

    let err = exchange(&transport).send("sess-1", "hi").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ServerError);
    assert!(err.recoverable);
}

#[tokio::test]
async fn closed_status_wins_over_malformed_creators() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({
        "agent_response": "bye",
        "session_status": "closed",
        "creators": [{ "id": "x", "name": "X", "rating": "high" }]
    }));
    transport.push_ok(json!({
        "agent_response": "bye",
        "session_status": "expired",
        "creators": "not a list",
        "metadata": 7
    }));
    let exchange = exchange(&transport);

    for _ in 0..2 {
        let err = exchange.send("sess-1", "hi").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionExpired);
        assert!(!err.recoverable);
    }
}

#[tokio::test]
async fn null_metadata_is_read_as_empty() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({
        "agent_response": "hello",
        "session_status": "active",
        "metadata": null,
        "creators": null
    }));

    let turn = exchange(&transport).send("sess-1", "hi").await.unwrap();
    assert_eq!(turn.message, "hello");
    assert!(turn.metadata.is_empty());
    assert!(turn.creators.is_empty());
}

#[tokio::test]
async fn bad_creators_shape_falls_back_to_reply_block() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({
        "agent_response": "One match\n<<<CREATORS_JSON_START>>>[{\"id\":\"v1\",\"name\":\"Ana\"}]<<<CREATORS_JSON_END>>>",
        "session_status": "active",
        "creators": { "unexpected": true }
    }));

    let turn = exchange(&transport).send("sess-1", "hi").await.unwrap();
    assert_eq!(turn.creators.len(), 1);
    assert_eq!(turn.creators[0].name, "Ana");
}

#[tokio::test]
async fn closed_status_is_recorded_before_payload_decoding() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({
        "agent_response": 12,
        "session_status": "closed"
    }));
    let tracker = TerminalTracker::new();

    let err = exchange(&transport)
        .with_tracker(tracker.clone())
        .send("sess-1", "hi")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SessionExpired);
    assert_eq!(
        tracker.terminal_status("sess-1").await,
        Some(SessionStatus::Closed)
    );
}

#[tokio::test]
async fn refine_posts_field_and_value() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "Updated your budget.", "session_status": "active" }));

    let turn = exchange(&transport)
        .refine("sess-1", " budget ", json!({ "min": 200, "max": 800 }))
        .await
        .unwrap();
    assert_eq!(turn.message, "Updated your budget.");

    let calls = transport.calls();
    assert_eq!(calls[0].path, "/api/v1/session/sess-1/refine");
    assert_eq!(
        calls[0].body,
        Some(json!({ "field": "budget", "value": { "min": 200, "max": 800 } }))
    );
}

#[tokio::test]
async fn refine_rejects_blank_field_without_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let err = exchange(&transport)
        .refine("sess-1", "  ", json!("x"))
        .await
        .unwrap_err();
    assert_eq!(err, ClassifiedError::empty_refinement_field());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn refine_on_closed_session_surfaces_server_message() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_err(TransportFailure::status(
        400,
        Some("Cannot refine closed session".into()),
    ));

    let err = exchange(&transport)
        .refine("sess-1", "location", json!("Porto"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, "Cannot refine closed session");
}

#[tokio::test]
async fn tracker_short_circuits_known_terminal_session() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "Wrapping up.", "session_status": "completed" }));
    let tracker = TerminalTracker::new();
    let exchange = exchange(&transport).with_tracker(tracker.clone());

    let turn = exchange.send("sess-1", "thanks").await.unwrap();
    assert!(turn.is_final());
    assert_eq!(transport.call_count(), 1);

    let err = exchange.send("sess-1", "one more thing").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SessionExpired);
    assert!(!err.recoverable);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn without_tracker_every_send_hits_the_service() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_ok(json!({ "agent_response": "closed", "session_status": "closed" }));
    transport.push_ok(json!({ "agent_response": "closed", "session_status": "closed" }));
    let exchange = exchange(&transport);

    assert!(exchange.send("sess-1", "a").await.is_err());
    assert!(exchange.send("sess-1", "b").await.is_err());
    assert_eq!(transport.call_count(), 2);
}
