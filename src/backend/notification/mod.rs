//! Live Notification Module
//!
//! This module delivers live push notifications to employees over
//! Server-Sent Events. It is the only part of the server that holds
//! long-lived connections and shared mutable state.
//!
//! # Architecture
//!
//! - **`channel`** - `PushChannel`, one open event stream and its lifecycle
//! - **`registry`** - `ChannelRegistry`, employee → open channel
//! - **`handshake`** - `SubscriptionHandshake`, token → registered channel
//! - **`notifier`** - `Notifier`, fire-and-forget push to an employee
//! - **`handlers`** - the `GET /noti/{token}` SSE endpoint
//!
//! # Data Flow
//!
//! ```text
//! client ── GET /noti/{token} ──► handshake ──► registry.register(channel)
//!                                     │
//!                                     └─► "connected" event
//!
//! producer ── notifier.notify(user, name, payload) ──► registry.lookup(user)
//!                                                          └─► channel.send(event)
//!
//! disconnect / timeout / error ──► lifecycle hook ──► registry.unregister_channel
//! ```
//!
//! # Delivery Guarantees
//!
//! None beyond best effort. An employee without an open channel misses the
//! event; nothing is queued or replayed. Producers persist their data first
//! and notify second, so a lost push never means lost data.
//!
//! # Deployment
//!
//! Channels have no server-side timeout unless `NOTIFY_MAX_LIFETIME_SECS` is
//! set. Reverse proxies and load balancers in front of the server need their
//! idle timeouts configured for long-lived streams; keep-alive comments are
//! sent every `NOTIFY_KEEP_ALIVE_SECS` to keep idle connections warm.

/// Push channel and its state machine
pub mod channel;

/// Employee → channel table
pub mod registry;

/// Subscription handshake
pub mod handshake;

/// Fire-and-forget notifications
pub mod notifier;

/// SSE endpoint
pub mod handlers;

pub use channel::{ChannelId, ChannelState, PushChannel, Subscription};
pub use registry::ChannelRegistry;
pub use handshake::SubscriptionHandshake;
pub use notifier::{Delivery, Notifier};
pub use handlers::handle_notification_subscription;
