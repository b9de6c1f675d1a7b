//! Backend Module
//!
//! This module contains all server-side code for Mingle Push: an Axum HTTP
//! server that keeps one Server-Sent Events channel open per online employee
//! and pushes named events into it.
//!
//! # Architecture
//!
//! - **`notification`** - Push channels, channel registry, subscription
//!   handshake, notifier and the SSE handler
//! - **`auth`** - JWT tokens and the `CredentialValidator` seam
//! - **`middleware`** - Bearer token extraction for API routes
//! - **`messaging`** - Message sending, the main notification producer
//! - **`server`** - Configuration, application state and initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── notification/   - Live notification core
//! ├── auth/           - Token validation
//! ├── middleware/     - Request extractors
//! ├── messaging/      - Message sending
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! └── error/          - Error types
//! ```
//!
//! # Subscription Lifecycle
//!
//! 1. `GET /noti/{token}` validates the token into an employee code
//! 2. A new push channel is created and `connected` is pushed into it
//! 3. The channel is registered, replacing any older channel of the employee
//! 4. Completion, timeout and error hooks unregister the channel again
//!
//! Producers call `Notifier::notify` with an employee code; an offline
//! employee is a silent no-op.
//!
//! # Thread Safety
//!
//! - The registry is a `DashMap` shared through `Arc`
//! - Channel state is a single atomic, so exactly one terminal transition wins
//! - Axum handlers are `Send + Sync`

/// Live notification core
pub mod notification;

/// Authentication and token validation
pub mod auth;

/// Request middleware
pub mod middleware;

/// Message sending
pub mod messaging;

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend-specific error types
pub mod error;
