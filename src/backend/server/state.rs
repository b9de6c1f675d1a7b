/**
 * Application State Management
 *
 * `AppState` is the central state container handed to every Axum handler.
 * It owns the channel registry explicitly instead of keeping it in a global:
 * every component that needs the registry receives a handle from here, and
 * tests build a fresh state per case.
 *
 * # Thread Safety
 *
 * Every field is `Clone + Send + Sync`:
 * - `ChannelRegistry` shares one concurrent map through an `Arc`
 * - `SubscriptionHandshake`, `Notifier` and `MessageService` hold registry
 *   handles and `Arc`s to their collaborators
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part they need,
 * e.g. `State(notifier): State<Notifier>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::CredentialValidator;
use crate::backend::messaging::{MessageService, MessageStore};
use crate::backend::notification::{ChannelRegistry, Notifier, SubscriptionHandshake};
use crate::backend::server::config::ServerConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Employee → open push channel
    pub registry: ChannelRegistry,

    /// Opens push channels for `GET /noti/{token}`
    pub handshake: SubscriptionHandshake,

    /// Fire-and-forget pushes for producers
    pub notifier: Notifier,

    /// Token validation for subscriptions and bearer-authenticated routes
    pub validator: Arc<dyn CredentialValidator>,

    /// Message sending
    pub messages: MessageService,
}

impl AppState {
    /// Wire all services around one fresh channel registry
    pub fn new(
        config: ServerConfig,
        validator: Arc<dyn CredentialValidator>,
        store: Arc<dyn MessageStore>,
    ) -> Self {
        let registry = ChannelRegistry::new();
        let handshake = SubscriptionHandshake::new(registry.clone(), validator.clone())
            .with_channel_capacity(config.channel_capacity);
        let notifier = Notifier::new(registry.clone());
        let messages = MessageService::new(store, notifier.clone());

        Self {
            config: Arc::new(config),
            registry,
            handshake,
            notifier,
            validator,
            messages,
        }
    }
}

impl FromRef<AppState> for ChannelRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for Notifier {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notifier.clone()
    }
}

impl FromRef<AppState> for MessageService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.messages.clone()
    }
}
