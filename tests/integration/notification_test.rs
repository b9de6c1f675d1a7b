//! Notification subscription integration tests
//!
//! Drives `GET /noti/{token}` through the full router and reads the SSE body.

use std::time::Duration;

use axum::http::{header, StatusCode};
use mingle_push::backend::routes::create_router;
use mingle_push::backend::server::config::ServerConfig;
use mingle_push::shared::UserId;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use crate::common::*;

#[tokio::test]
async fn test_subscribe_receives_connected_then_new_message() {
    let state = test_state();
    let app = create_router(state.clone());

    let response = app.oneshot(subscribe_request(ALICE_TOKEN)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("text/event-stream"));
    assert!(state.registry.contains(&UserId::from(ALICE)));

    let mut reader = SseReader::new(response.into_body());

    let connected = reader.next_event().await.expect("connected frame");
    assert_eq!(connected.event.as_deref(), Some("connected"));
    assert_eq!(connected.data, "connection established");

    state
        .notifier
        .notify(&UserId::from(ALICE), "newMessage", "msg from E200");

    let message = reader.next_event().await.expect("newMessage frame");
    assert_eq!(message.event.as_deref(), Some("newMessage"));
    assert_eq!(message.data, "msg from E200");

    drop(reader);
    assert!(!state.registry.contains(&UserId::from(ALICE)));
    assert!(state.registry.is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let state = test_state();
    let app = create_router(state.clone());

    let response = app.oneshot(subscribe_request("bad")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], 401);
    assert!(state.registry.is_empty());
}

#[tokio::test]
async fn test_invalid_token_leaves_existing_channels_alone() {
    let state = test_state();

    let response = create_router(state.clone())
        .oneshot(subscribe_request(BOB_TOKEN))
        .await
        .unwrap();
    let mut bob = SseReader::new(response.into_body());
    assert!(bob.next_event().await.is_some());

    let rejected = create_router(state.clone())
        .oneshot(subscribe_request("bad"))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(state.registry.len(), 1);
    assert!(state.registry.contains(&UserId::from(BOB)));
}

#[tokio::test]
async fn test_resubscribe_replaces_previous_stream() {
    let state = test_state();

    let first = create_router(state.clone())
        .oneshot(subscribe_request(ALICE_TOKEN))
        .await
        .unwrap();
    let mut first = SseReader::new(first.into_body());
    assert_eq!(
        first.next_event().await.and_then(|f| f.event).as_deref(),
        Some("connected")
    );

    let second = create_router(state.clone())
        .oneshot(subscribe_request(ALICE_TOKEN))
        .await
        .unwrap();
    let mut second = SseReader::new(second.into_body());
    assert_eq!(
        second.next_event().await.and_then(|f| f.event).as_deref(),
        Some("connected")
    );

    // The displaced stream ends
    assert!(first.is_closed().await);
    drop(first);

    assert_eq!(state.registry.len(), 1);
    state
        .notifier
        .notify(&UserId::from(ALICE), "newMessage", "msg from E200");
    let frame = second.next_event().await.expect("event on the new stream");
    assert_eq!(frame.data, "msg from E200");
}

#[tokio::test]
async fn test_events_for_other_employees_are_not_delivered() {
    let state = test_state();

    let response = create_router(state.clone())
        .oneshot(subscribe_request(ALICE_TOKEN))
        .await
        .unwrap();
    let mut alice = SseReader::new(response.into_body());
    assert!(alice.next_event().await.is_some());

    state
        .notifier
        .notify(&UserId::from(BOB), "newMessage", "msg from E100");
    state
        .notifier
        .notify(&UserId::from(ALICE), "newMessage", "msg from E300");

    let frame = alice.next_event().await.expect("alice's own event");
    assert_eq!(frame.data, "msg from E300");
}

#[tokio::test]
async fn test_keep_alive_comments_are_sent() {
    let config = ServerConfig::builder()
        .keep_alive_interval(Duration::from_millis(50))
        .build()
        .unwrap();
    let (state, _store) = test_state_with(config);

    let response = create_router(state)
        .oneshot(subscribe_request(ALICE_TOKEN))
        .await
        .unwrap();
    let mut reader = SseReader::new(response.into_body());
    assert!(reader.next_event().await.is_some());

    let frame = reader.next_raw().await.expect("keep-alive frame");
    assert!(frame.is_comment());
    assert_eq!(frame.comments, vec!["keep-alive".to_string()]);
}

#[tokio::test]
async fn test_max_lifetime_ends_stream_and_unregisters() {
    let config = ServerConfig::builder()
        .keep_alive_interval(Duration::from_secs(600))
        .max_connection_lifetime(Some(Duration::from_millis(100)))
        .build()
        .unwrap();
    let (state, _store) = test_state_with(config);

    let response = create_router(state.clone())
        .oneshot(subscribe_request(ALICE_TOKEN))
        .await
        .unwrap();
    let mut reader = SseReader::new(response.into_body());
    assert!(reader.next_event().await.is_some());

    assert!(reader.is_closed().await);
    assert!(state.registry.is_empty());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = create_router(test_state())
        .oneshot(
            axum::http::Request::builder()
                .uri("/nowhere")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
