/**
 * Message Types
 *
 * Request and response bodies for the message send endpoint. Message storage
 * itself lives behind the `MessageStore` interface on the server; these types
 * only describe what crosses the wire.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::UserId;

/// Body of `POST /message/send`
///
/// The sender is never part of the body; it is taken from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageRequest {
    /// Employee code of the recipient
    pub receiver: UserId,
    /// Message text
    pub content: String,
}

/// A message after it has been persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredMessage {
    /// Identifier assigned by the store
    pub id: u64,
    pub sender: UserId,
    pub receiver: UserId,
    pub content: String,
    /// When the store accepted the message
    pub sent_at: DateTime<Utc>,
}

/// Envelope used by the portal's JSON endpoints
///
/// ```json
/// { "status": 200, "message": "message sent", "data": { ... } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a 200 response carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: Some(data),
        }
    }
}
