//! Message sending integration tests
//!
//! `POST /message/send` is the producer side: a stored message pushes
//! `newMessage` to the recipient's open stream.

use axum::http::StatusCode;
use mingle_push::backend::routes::create_router;
use mingle_push::shared::UserId;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use crate::common::*;

#[tokio::test]
async fn test_send_message_notifies_online_receiver() {
    let (state, store) = test_state_with(test_config());

    let stream = create_router(state.clone())
        .oneshot(subscribe_request(ALICE_TOKEN))
        .await
        .unwrap();
    let mut alice = SseReader::new(stream.into_body());
    assert_eq!(
        alice.next_event().await.and_then(|f| f.event).as_deref(),
        Some("connected")
    );

    let response = create_router(state.clone())
        .oneshot(send_message_request(
            Some(BOB_TOKEN),
            json!({ "receiver": ALICE, "content": "Meeting moved to 3pm" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "message sent");
    assert_eq!(body["data"]["sender"], BOB);
    assert_eq!(body["data"]["receiver"], ALICE);

    let frame = alice.next_event().await.expect("newMessage frame");
    assert_eq!(frame.event.as_deref(), Some("newMessage"));
    assert_eq!(frame.data, "msg from E200");

    assert_eq!(store.received_by(&UserId::from(ALICE)).len(), 1);
}

#[tokio::test]
async fn test_send_message_to_offline_receiver_still_stores() {
    let (state, store) = test_state_with(test_config());

    let response = create_router(state.clone())
        .oneshot(send_message_request(
            Some(ALICE_TOKEN),
            json!({ "receiver": "E999", "content": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 1);
    assert!(state.registry.is_empty());
}

#[tokio::test]
async fn test_send_message_requires_bearer_token() {
    let (state, store) = test_state_with(test_config());

    let missing = create_router(state.clone())
        .oneshot(send_message_request(
            None,
            json!({ "receiver": BOB, "content": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let invalid = create_router(state)
        .oneshot(send_message_request(
            Some("bad"),
            json!({ "receiver": BOB, "content": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_send_empty_message_is_bad_request() {
    let (state, store) = test_state_with(test_config());

    let response = create_router(state)
        .oneshot(send_message_request(
            Some(ALICE_TOKEN),
            json!({ "receiver": BOB, "content": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], 400);
    assert!(store.is_empty());
}
