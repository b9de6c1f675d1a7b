/**
 * Message Handlers
 *
 * `POST /message/send` stores a message from the authenticated employee and
 * pushes a `newMessage` event to the recipient if they are online.
 *
 * # Example Request
 *
 * ```http
 * POST /message/send HTTP/1.1
 * Authorization: Bearer <token>
 * Content-Type: application/json
 *
 * {"receiver": "E100", "content": "Meeting moved to 3pm"}
 * ```
 */

use axum::{extract::State, Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, SendMessageRequest, StoredMessage};

/// Handle message sending (POST /message/send)
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid bearer token
/// * `400 Bad Request` - empty recipient or content
/// * `503 Service Unavailable` - the message store is down
pub async fn send_message(
    State(app_state): State<AppState>,
    AuthUser(sender): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<StoredMessage>>, BackendError> {
    let stored = app_state.messages.send_message(&sender, request)?;
    Ok(Json(ApiResponse::ok("message sent", stored)))
}
