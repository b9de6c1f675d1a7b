/**
 * Message Routes
 *
 * # Routes
 *
 * - `POST /message/send` - Send an internal message (requires authentication)
 *
 * A successful send pushes `newMessage` to the receiver when they are online.
 */

use axum::{routing::post, Router};

use crate::backend::messaging::handlers::send_message;
use crate::backend::server::state::AppState;

/// Configure message routes
///
/// # Authentication
///
/// `/message/send` requires a token in the `Authorization: Bearer` header.
pub fn configure_message_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/message/send", post(send_message))
}
