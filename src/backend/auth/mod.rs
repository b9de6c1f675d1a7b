//! Authentication Module
//!
//! This module validates the access tokens presented by subscribing clients
//! and by API callers. Token issuance belongs to the portal's login flow;
//! `create_token` exists here for tests and local tooling.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - JWT creation and verification
//! └── validator.rs    - CredentialValidator trait and implementations
//! ```
//!
//! # Security
//!
//! - Tokens are HS256 JWTs signed with `JWT_SECRET`
//! - Expired tokens are rejected
//! - Invalid credentials return 401 without saying why

/// JWT token generation and validation
pub mod sessions;

/// Credential validation seam
pub mod validator;

pub use sessions::{create_token, verify_token, Claims};
pub use validator::{CredentialValidator, JwtValidator, StaticTokenValidator};
