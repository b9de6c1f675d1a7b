/**
 * Notifier
 *
 * The fire-and-forget entry point the rest of the system uses to push an
 * event to an employee. It never fails: an offline employee is not an error,
 * and a channel that turns out to be dead is cleaned up on the spot.
 */

use crate::backend::error::SendError;
use crate::backend::notification::registry::ChannelRegistry;
use crate::shared::{PushEvent, UserId};

/// What happened to one notification
///
/// Purely informational. Callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The event was handed to the employee's channel
    Delivered,
    /// The employee has no open channel
    Offline,
    /// The channel is alive but its buffer is full; the event was dropped
    Dropped,
    /// The channel was dead and has been unregistered
    Failed,
}

/// Pushes events to employees who are currently subscribed
#[derive(Clone)]
pub struct Notifier {
    registry: ChannelRegistry,
}

impl Notifier {
    pub fn new(registry: ChannelRegistry) -> Self {
        Self { registry }
    }

    /// Push `event_name` with `payload` to `user_id` if they are online
    ///
    /// # Example
    ///
    /// ```rust
    /// use mingle_push::backend::notification::{ChannelRegistry, Delivery, Notifier};
    /// use mingle_push::shared::UserId;
    ///
    /// let notifier = Notifier::new(ChannelRegistry::new());
    /// let delivery = notifier.notify(&UserId::from("E100"), "newMessage", "msg from E200");
    /// assert_eq!(delivery, Delivery::Offline);
    /// ```
    pub fn notify(
        &self,
        user_id: &UserId,
        event_name: &str,
        payload: impl Into<String>,
    ) -> Delivery {
        self.notify_event(user_id, PushEvent::new(event_name, payload))
    }

    /// Push a prepared event to `user_id` if they are online
    pub fn notify_event(&self, user_id: &UserId, event: PushEvent) -> Delivery {
        let Some(channel) = self.registry.lookup(user_id) else {
            tracing::debug!("[Notifier] {} is offline, '{}' not pushed", user_id, event.name);
            return Delivery::Offline;
        };

        let event_name = event.name.clone();
        match channel.send(event) {
            Ok(()) => {
                tracing::debug!("[Notifier] Pushed '{}' to {}", event_name, user_id);
                Delivery::Delivered
            }
            Err(SendError::ChannelFull) => {
                tracing::warn!(
                    "[Notifier] Channel for {} is not draining, dropped '{}'",
                    user_id,
                    event_name
                );
                Delivery::Dropped
            }
            Err(SendError::ChannelClosed) => {
                tracing::info!(
                    "[Notifier] Channel {} for {} is closed, unregistering",
                    channel.id(),
                    user_id
                );
                channel.fail();
                self.registry.unregister_channel(user_id, channel.id());
                Delivery::Failed
            }
        }
    }
}
