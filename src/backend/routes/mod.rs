//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs                  - Module exports and documentation
//! ├── router.rs               - Main router creation
//! ├── notification_routes.rs  - SSE subscription route
//! └── message_routes.rs       - Message sending route
//! ```
//!
//! # Routes
//!
//! - `GET /noti/{token}` - Push channel subscription (`text/event-stream`)
//! - `POST /message/send` - Send a message, notifying the receiver
//!
//! Anything else falls through to a plain `404 Not Found`.

/// Main router creation
pub mod router;

/// Notification route configuration
pub mod notification_routes;

/// Message route configuration
pub mod message_routes;

// Re-export commonly used functions
pub use router::create_router;
