//! Mingle Push - Live Notification Library
//!
//! Mingle Push is the live notification subsystem of the Mingle employee
//! portal. Employees keep one Server-Sent Events stream open per session and
//! receive a named event whenever something notable happens to them, such as
//! a new internal message arriving in their inbox.
//!
//! # Module Structure
//!
//! - **`shared`** - Types a client and the server agree on
//!   - `UserId`, `PushEvent`, message request/response bodies
//!
//! - **`backend`** - Server-side code
//!   - Channel registry, push channels, subscription handshake, notifier
//!   - Credential validation and bearer authentication
//!   - Message sending that triggers notifications
//!   - Axum router, configuration and application state
//!
//! # Usage
//!
//! ```rust,no_run
//! use mingle_push::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Delivery Model
//!
//! Delivery is best-effort and single-process: an offline employee simply
//! misses the event, nothing is queued or replayed. A subscriber that stops
//! draining its stream has events dropped rather than slowing the producer.
//!
//! # Thread Safety
//!
//! - The channel registry is a sharded concurrent map shared through `Arc`
//! - Push channels are cheap cloneable handles with an atomic state machine
//! - Every service object in `AppState` is `Clone + Send + Sync`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
