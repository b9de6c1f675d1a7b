//! Server Module
//!
//! Server initialization, application state and configuration.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading
//! └── init.rs         - State and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mingle_push::backend::server::{config::ServerConfig, create_app};
//!
//! let app = create_app(ServerConfig::default());
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{create_app, create_state, shutdown_on};
