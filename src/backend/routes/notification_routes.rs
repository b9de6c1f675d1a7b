/**
 * Notification Routes
 *
 * # Routes
 *
 * - `GET /noti/{token}` - Open the caller's push channel as an SSE stream
 *
 * The credential travels in the path because `EventSource` cannot set an
 * `Authorization` header.
 */

use axum::{routing::get, Router};

use crate::backend::notification::handle_notification_subscription;
use crate::backend::server::state::AppState;

/// Configure notification routes
pub fn configure_notification_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/noti/{token}", get(handle_notification_subscription))
}
