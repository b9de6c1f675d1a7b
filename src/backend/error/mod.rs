//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! Handler errors can be converted to HTTP responses; delivery errors stay
//! inside the notification core.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `AuthError` - Subscription or bearer token rejected
//! - `SendError` - One push to one channel failed
//! - `StoreError` - Message store collaborator failed
//! - `BackendError` - Anything an HTTP handler returns
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return it directly.
//! The body is `{"error": "...", "status": 401}`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{AuthError, BackendError, SendError, StoreError};
