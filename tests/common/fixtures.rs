//! Application state fixtures
//!
//! Every test gets a fresh `AppState` backed by a `StaticTokenValidator`, so
//! no JWTs need to be minted and no state leaks between tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request};
use mingle_push::backend::auth::StaticTokenValidator;
use mingle_push::backend::messaging::InMemoryMessageStore;
use mingle_push::backend::server::config::ServerConfig;
use mingle_push::backend::server::AppState;

/// Token that validates to [`ALICE`]
pub const ALICE_TOKEN: &str = "tok123";
pub const ALICE: &str = "E100";

/// Token that validates to [`BOB`]
pub const BOB_TOKEN: &str = "tok200";
pub const BOB: &str = "E200";

/// Test configuration
///
/// The keep-alive interval is long enough that no comment frame shows up
/// unless a test asks for one.
pub fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .keep_alive_interval(Duration::from_secs(600))
        .build()
        .expect("valid test config")
}

/// Validator that knows [`ALICE_TOKEN`] and [`BOB_TOKEN`]
pub fn test_validator() -> Arc<StaticTokenValidator> {
    Arc::new(StaticTokenValidator::new([
        (ALICE_TOKEN, ALICE),
        (BOB_TOKEN, BOB),
    ]))
}

/// Fresh state with the default test configuration
pub fn test_state() -> AppState {
    test_state_with(test_config()).0
}

/// Fresh state with a custom configuration; the store is returned for
/// inspection
pub fn test_state_with(config: ServerConfig) -> (AppState, Arc<InMemoryMessageStore>) {
    let store = Arc::new(InMemoryMessageStore::new());
    let state = AppState::new(config, test_validator(), store.clone());
    (state, store)
}

/// `GET /noti/{token}`
pub fn subscribe_request(token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(format!("/noti/{}", token))
        .header(header::ACCEPT, "text/event-stream")
        .body(Body::empty())
        .expect("valid request")
}

/// `POST /message/send` with an optional bearer token
pub fn send_message_request(token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/message/send")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Collect a non-streaming response body as JSON
pub async fn json_body(body: Body) -> serde_json::Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("JSON body")
}
