//! Shared Module
//!
//! This module contains types that both the server and its clients agree on:
//! user identities, push events and the bodies exchanged by the message API.
//! None of these types depend on server state, so a client crate can use them
//! for deserialization without pulling in the backend.

/// Employee identity used to key push channels
pub mod user;

/// Named push events delivered over a subscription stream
pub mod event;

/// Message send request and stored message types
pub mod message;

/// Re-export commonly used types for convenience
pub use user::UserId;
pub use event::PushEvent;
pub use message::{ApiResponse, SendMessageRequest, StoredMessage};
