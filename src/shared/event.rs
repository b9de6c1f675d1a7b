/**
 * Push Events
 *
 * A push event is a named event with a textual payload, delivered as one
 * Server-Sent Events frame:
 *
 * ```text
 * event: newMessage
 * data: msg from E200
 * ```
 *
 * Browser clients bind listeners to the event name
 * (`source.addEventListener("newMessage", ...)`), so names are part of the
 * public contract and live here as constants.
 */
use serde::{Deserialize, Serialize};

/// Name of the liveness event sent right after a subscription opens
pub const CONNECTED_EVENT: &str = "connected";

/// Payload of the liveness event
pub const CONNECTED_PAYLOAD: &str = "connection established";

/// Name of the event sent to a recipient when a message arrives
pub const NEW_MESSAGE_EVENT: &str = "newMessage";

/// A named event plus its payload, delivered atomically to one channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PushEvent {
    /// Event name (the SSE `event:` field)
    pub name: String,
    /// Event payload (the SSE `data:` field)
    pub payload: String,
}

impl PushEvent {
    /// Create a new push event
    pub fn new(name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Create the liveness event sent when a subscription opens
    ///
    /// Some proxies close a streaming response that has not produced a
    /// single byte, so every stream starts with this event.
    pub fn connected() -> Self {
        Self::new(CONNECTED_EVENT, CONNECTED_PAYLOAD)
    }

    /// Create a new-message event naming the sender
    ///
    /// # Example
    /// ```rust
    /// use mingle_push::shared::PushEvent;
    ///
    /// let event = PushEvent::new_message("E200");
    /// assert_eq!(event.name, "newMessage");
    /// assert_eq!(event.payload, "msg from E200");
    /// ```
    pub fn new_message(sender: impl std::fmt::Display) -> Self {
        Self::new(NEW_MESSAGE_EVENT, format!("msg from {}", sender))
    }
}
