//! Messaging Module
//!
//! Internal messages between employees. Only the send path lives here,
//! because it is what produces `newMessage` notifications; inbox, outbox and
//! starred views belong to the portal's message service.
//!
//! - **`store`** - `MessageStore` interface and an in-memory implementation
//! - **`service`** - `MessageService::send_message` (persist, then notify)
//! - **`handlers`** - `POST /message/send`

pub mod store;

pub mod service;

pub mod handlers;

pub use store::{InMemoryMessageStore, MessageStore};
pub use service::MessageService;
