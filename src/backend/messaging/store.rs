/**
 * Message Store
 *
 * "Persist message" is a collaborator of the notification subsystem: the
 * inbox, outbox and starred views all live elsewhere. `MessageStore` is the
 * narrow interface the send path needs, and `InMemoryMessageStore` backs it
 * for local runs and tests.
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use crate::backend::error::StoreError;
use crate::shared::{StoredMessage, UserId};

/// Persists messages on behalf of the send path
pub trait MessageStore: Send + Sync {
    /// Store a message and return it with its assigned id
    fn persist(
        &self,
        sender: &UserId,
        receiver: &UserId,
        content: &str,
    ) -> Result<StoredMessage, StoreError>;
}

/// Volatile message store
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    next_id: AtomicU64,
    messages: RwLock<Vec<StoredMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages addressed to `receiver`, oldest first
    pub fn received_by(&self, receiver: &UserId) -> Vec<StoredMessage> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|message| &message.receiver == receiver)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageStore for InMemoryMessageStore {
    fn persist(
        &self,
        sender: &UserId,
        receiver: &UserId,
        content: &str,
    ) -> Result<StoredMessage, StoreError> {
        let message = StoredMessage {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            sender: sender.clone(),
            receiver: receiver.clone(),
            content: content.to_string(),
            sent_at: Utc::now(),
        };

        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        Ok(message)
    }
}
