/**
 * Notification Subscription Handler
 *
 * Implements `GET /noti/{token}`, the Server-Sent Events endpoint browsers
 * open once per session.
 *
 * # Example Response
 *
 * ```http
 * HTTP/1.1 200 OK
 * Content-Type: text/event-stream
 * Cache-Control: no-cache
 *
 * event: connected
 * data: connection established
 *
 * event: newMessage
 * data: msg from E200
 *
 * : keep-alive
 * ```
 *
 * The response never finishes under normal operation. It ends when the
 * client disconnects, when a newer subscription from the same employee
 * replaces it, or when the optional maximum lifetime passes.
 */

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::StreamExt;
use tokio_stream::Stream;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::PushEvent;

/// Convert a push event into an SSE frame
///
/// Line breaks are stripped from the event name; the SSE `event:` field is a
/// single line. Multi-line payloads become several `data:` lines.
pub fn to_sse_event(event: PushEvent) -> Event {
    let name: String = event
        .name
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();
    Event::default().event(name).data(event.payload)
}

/// Handle a notification subscription (GET /noti/{token})
///
/// # Errors
///
/// * `401 Unauthorized` - the token does not validate; no channel is created
pub async fn handle_notification_subscription(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, BackendError> {
    let subscription = app_state.handshake.subscribe(&token)?;

    let stream = subscription
        .into_stream(app_state.config.max_connection_lifetime)
        .map(|event| Ok::<_, Infallible>(to_sse_event(event)));

    let keep_alive = KeepAlive::new()
        .interval(app_state.config.keep_alive_interval)
        .text("keep-alive");

    Ok(Sse::new(stream).keep_alive(keep_alive))
}
