/**
 * Message Sending
 *
 * Sending a message is the main producer of live notifications. The message
 * is persisted first and the recipient is notified second, so a push that
 * never arrives cannot leave a message unstored. Whether the push succeeds
 * has no bearing on the outcome of the send.
 */

use std::sync::Arc;

use crate::backend::error::StoreError;
use crate::backend::messaging::store::MessageStore;
use crate::backend::notification::Notifier;
use crate::shared::{PushEvent, SendMessageRequest, StoredMessage, UserId};

/// Persists messages and notifies their recipients
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    notifier: Notifier,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Send a message from `sender`
    ///
    /// # Errors
    ///
    /// `StoreError::Invalid` for an empty body or recipient, or whatever the
    /// store reports. Notification problems are never returned.
    pub fn send_message(
        &self,
        sender: &UserId,
        request: SendMessageRequest,
    ) -> Result<StoredMessage, StoreError> {
        if request.receiver.as_str().trim().is_empty() {
            return Err(StoreError::Invalid {
                message: "receiver is required".to_string(),
            });
        }
        if request.content.trim().is_empty() {
            return Err(StoreError::Invalid {
                message: "message content is empty".to_string(),
            });
        }

        let stored = self
            .store
            .persist(sender, &request.receiver, &request.content)?;
        tracing::info!(
            "[Message] Message {} stored from {} to {}",
            stored.id,
            sender,
            stored.receiver
        );

        let delivery = self
            .notifier
            .notify_event(&stored.receiver, PushEvent::new_message(sender));
        tracing::debug!("[Message] Notification for message {}: {:?}", stored.id, delivery);

        Ok(stored)
    }
}
