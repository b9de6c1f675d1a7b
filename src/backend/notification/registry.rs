/**
 * Channel Registry
 *
 * The registry maps each employee to the one push channel currently open for
 * them. It is the only shared mutable state of the notification subsystem and
 * is touched concurrently by subscription handshakes (register), notification
 * producers (lookup) and lifecycle hooks fired from transport tasks
 * (unregister).
 *
 * # Concurrency
 *
 * Entries live in a sharded `DashMap`, so callers never lock anything
 * themselves and a lookup for one employee does not wait on another
 * employee's registration. Lookups clone the channel handle out of the map
 * and release the shard before anyone sends through it.
 *
 * Channels removed from the map are closed only after the shard guard has
 * been released. Closing runs lifecycle hooks, and those hooks call back into
 * the registry.
 *
 * # Replacement
 *
 * An employee has at most one registered channel. A new subscription
 * replaces the previous entry and the displaced channel is completed, which
 * ends its stream instead of leaving an orphaned connection open.
 */

use std::sync::Arc;

use dashmap::DashMap;

use crate::backend::notification::channel::{ChannelId, PushChannel};
use crate::shared::UserId;

/// Process-wide table of open push channels, keyed by employee
///
/// Cloning the registry yields another handle to the same table.
///
/// # Example
///
/// ```rust
/// use mingle_push::backend::notification::{ChannelRegistry, PushChannel};
/// use mingle_push::shared::UserId;
///
/// let registry = ChannelRegistry::new();
/// let (channel, _rx) = PushChannel::new(UserId::from("E100"), 16);
/// registry.register(channel.clone());
///
/// assert_eq!(registry.lookup(&UserId::from("E100")), Some(channel));
/// ```
#[derive(Clone, Default)]
pub struct ChannelRegistry {
    channels: Arc<DashMap<UserId, PushChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `channel` under its employee, replacing any previous channel
    ///
    /// The displaced channel, if any, is completed and returned.
    pub fn register(&self, channel: PushChannel) -> Option<PushChannel> {
        let user_id = channel.user_id().clone();
        let channel_id = channel.id();
        let previous = self.channels.insert(user_id.clone(), channel);

        match previous {
            Some(previous) if previous.id() != channel_id => {
                tracing::info!(
                    "[Registry] Replacing channel {} for {} with {}",
                    previous.id(),
                    user_id,
                    channel_id
                );
                previous.complete();
                Some(previous)
            }
            Some(_) => None,
            None => {
                tracing::debug!("[Registry] Registered channel {} for {}", channel_id, user_id);
                None
            }
        }
    }

    /// Remove whatever channel is registered for `user_id`
    ///
    /// The removed channel is completed. Unregistering an employee without
    /// a channel does nothing.
    pub fn unregister(&self, user_id: &UserId) -> Option<PushChannel> {
        let (_, channel) = self.channels.remove(user_id)?;
        tracing::debug!("[Registry] Unregistered channel {} for {}", channel.id(), user_id);
        channel.complete();
        Some(channel)
    }

    /// Remove the entry for `user_id` only if it is still `channel_id`
    ///
    /// This is the cleanup path for lifecycle hooks and failed deliveries: a
    /// stale channel must never evict the newer channel that replaced it.
    /// Returns `true` if an entry was removed.
    pub fn unregister_channel(&self, user_id: &UserId, channel_id: ChannelId) -> bool {
        let removed = self
            .channels
            .remove_if(user_id, |_, current| current.id() == channel_id);

        match removed {
            Some((_, channel)) => {
                tracing::debug!("[Registry] Cleaned up channel {} for {}", channel_id, user_id);
                channel.complete();
                true
            }
            None => false,
        }
    }

    /// Current channel for `user_id`, if the employee is subscribed
    pub fn lookup(&self, user_id: &UserId) -> Option<PushChannel> {
        self.channels
            .get(user_id)
            .map(|entry| entry.value().clone())
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.channels.contains_key(user_id)
    }

    /// Number of employees with an open channel
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Remove and complete every registered channel
    ///
    /// Used at shutdown: open SSE responses never finish on their own, so
    /// graceful shutdown would otherwise wait forever. Returns how many
    /// channels were closed.
    pub fn close_all(&self) -> usize {
        let snapshot: Vec<(UserId, ChannelId)> = self
            .channels
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().id()))
            .collect();

        let closed = snapshot
            .into_iter()
            .filter(|(user_id, channel_id)| self.unregister_channel(user_id, *channel_id))
            .count();

        tracing::info!("[Registry] Closed {} push channels", closed);
        closed
    }
}
