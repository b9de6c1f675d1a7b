/**
 * Subscription Handshake
 *
 * Turns an inbound subscription request into a registered push channel:
 *
 * 1. Validate the access token and derive the employee
 * 2. Create a push channel for that employee
 * 3. Send the `connected` liveness event
 * 4. Register the channel, replacing any previous one
 * 5. Wire the lifecycle hooks that remove the entry again
 * 6. Hand the receiving side back to the transport
 *
 * A rejected token stops at step 1, before any channel exists, so the
 * registry never sees a half-registered subscription.
 */

use std::sync::Arc;

use crate::backend::auth::CredentialValidator;
use crate::backend::error::AuthError;
use crate::backend::notification::channel::{PushChannel, Subscription};
use crate::backend::notification::registry::ChannelRegistry;
use crate::shared::PushEvent;

/// Default per-channel buffer size
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Opens push channels for authenticated subscribers
#[derive(Clone)]
pub struct SubscriptionHandshake {
    registry: ChannelRegistry,
    validator: Arc<dyn CredentialValidator>,
    channel_capacity: usize,
}

impl SubscriptionHandshake {
    pub fn new(registry: ChannelRegistry, validator: Arc<dyn CredentialValidator>) -> Self {
        Self {
            registry,
            validator,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Set how many undelivered events each channel may buffer
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Open a subscription for the bearer of `token`
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredential` if the token does not validate. The
    /// registry is left untouched in that case.
    pub fn subscribe(&self, token: &str) -> Result<Subscription, AuthError> {
        let user_id = self.validator.validate(token).map_err(|e| {
            tracing::warn!("[Subscribe] Rejected subscription: {}", e);
            e
        })?;
        tracing::info!("[Subscribe] Subscription request for {}", user_id);

        let (channel, receiver) = PushChannel::new(user_id, self.channel_capacity);

        // A failed liveness event is not fatal; the channel's own lifecycle
        // cleans it up once the transport notices.
        if let Err(e) = channel.send(PushEvent::connected()) {
            tracing::warn!(
                "[Subscribe] Initial event for {} not sent: {}",
                channel.user_id(),
                e
            );
        }

        self.registry.register(channel.clone());
        wire_cleanup(&self.registry, &channel);

        tracing::info!(
            "[Subscribe] Channel {} open for {} ({} subscribers)",
            channel.id(),
            channel.user_id(),
            self.registry.len()
        );
        Ok(Subscription::new(channel, receiver))
    }
}

/// Remove the channel's registry entry on any terminal state
///
/// Each hook only removes the entry while it still belongs to this channel,
/// so a channel that was replaced cannot evict its successor.
pub fn wire_cleanup(registry: &ChannelRegistry, channel: &PushChannel) {
    channel.on_completion(cleanup_hook(registry, channel));
    channel.on_timeout(cleanup_hook(registry, channel));
    channel.on_error(cleanup_hook(registry, channel));
}

fn cleanup_hook(registry: &ChannelRegistry, channel: &PushChannel) -> impl FnOnce() + Send + 'static {
    let registry = registry.clone();
    let user_id = channel.user_id().clone();
    let channel_id = channel.id();
    move || {
        registry.unregister_channel(&user_id, channel_id);
    }
}
