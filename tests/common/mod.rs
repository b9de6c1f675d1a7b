//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Application state fixtures with a fixed token table
//! - An SSE reader for streaming response bodies

pub mod fixtures;
pub mod sse;

// Re-export commonly used utilities
pub use fixtures::*;
pub use sse::*;
