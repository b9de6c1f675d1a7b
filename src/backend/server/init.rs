/**
 * Server Initialization
 *
 * Builds the application state and router.
 *
 * # Initialization Process
 *
 * 1. Create the JWT credential validator from the configured secret
 * 2. Create the message store
 * 3. Wire registry, handshake, notifier and message service into `AppState`
 * 4. Create the router
 */

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::Router;

use crate::backend::auth::JwtValidator;
use crate::backend::messaging::InMemoryMessageStore;
use crate::backend::notification::ChannelRegistry;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Build the production application state
///
/// Messages are kept in memory; a deployment backed by the portal database
/// builds its state with `AppState::new` and its own `MessageStore`.
pub fn create_state(config: ServerConfig) -> AppState {
    tracing::info!("Initializing Mingle push server");

    let validator = Arc::new(JwtValidator::new(config.jwt_secret.clone()));
    let store = Arc::new(InMemoryMessageStore::new());

    let state = AppState::new(config, validator, store);
    tracing::info!(
        "Channel registry ready (capacity {} per channel, keep-alive {:?}, max lifetime {:?})",
        state.config.channel_capacity,
        state.config.keep_alive_interval,
        state.config.max_connection_lifetime
    );
    state
}

/// Create and configure the Axum application
pub fn create_app(config: ServerConfig) -> Router<()> {
    create_router(create_state(config))
}

/// Wait for `signal`, then close every push channel
///
/// Pass this to `axum::serve(..).with_graceful_shutdown`. Open SSE responses
/// only finish once their channel is closed, so the registry is drained here.
/// If the signal cannot be listened for, this never resolves and the server
/// keeps running.
pub async fn shutdown_on(signal: impl Future<Output = io::Result<()>>, registry: ChannelRegistry) {
    if let Err(e) = signal.await {
        tracing::error!("[SHUTDOWN] Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    let closed = registry.close_all();
    tracing::info!("[SHUTDOWN] Closed {} push channel(s)", closed);
}
