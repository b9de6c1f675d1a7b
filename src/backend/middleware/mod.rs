//! Middleware Module
//!
//! Request processing shared by API routes.
//!
//! - **`auth`** - `AuthUser` extractor for bearer-authenticated routes
//!
//! # Example
//!
//! ```rust,ignore
//! async fn handler(AuthUser(user_id): AuthUser) -> String {
//!     format!("hello {}", user_id)
//! }
//! ```

pub mod auth;

pub use auth::{bearer_token, AuthUser};
