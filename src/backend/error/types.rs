/**
 * Backend Error Types
 *
 * This module defines the error types used by the notification core and the
 * HTTP handlers on top of it.
 *
 * # Error Categories
 *
 * ## Credential Errors
 *
 * `AuthError` is the only error a subscribing client ever sees. It is raised
 * before any push channel exists, so a rejected subscription leaves no trace
 * in the channel registry.
 *
 * ## Delivery Errors
 *
 * `SendError` describes why one push could not be written to one channel.
 * The notifier recovers from it locally; it never reaches the operation that
 * produced the event.
 *
 * ## Store Errors
 *
 * `StoreError` comes from the message store collaborator.
 *
 * ## Handler Errors
 *
 * `BackendError` wraps everything an HTTP handler can fail with and knows
 * which status code to answer with.
 */

use thiserror::Error;
use axum::http::StatusCode;

/// Credential validation failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The token is malformed, has a bad signature, is expired, or names
    /// no usable user
    #[error("Invalid credential: {reason}")]
    InvalidCredential {
        /// Why validation failed, for logs only
        reason: String,
    },
}

impl AuthError {
    /// Create a new invalid credential error
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidCredential {
            reason: reason.into(),
        }
    }
}

/// Failure to push one event through one channel
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SendError {
    /// The channel reached a terminal state or its stream has gone away
    #[error("push channel is closed")]
    ChannelClosed,

    /// The subscriber is not draining its buffer; the event was dropped
    #[error("push channel buffer is full")]
    ChannelFull,
}

/// Message store failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The message was rejected before being stored
    #[error("Invalid message: {message}")]
    Invalid {
        message: String,
    },

    /// The store could not be reached or refused the write
    #[error("Store unavailable: {message}")]
    Unavailable {
        message: String,
    },
}

/// Backend-specific error types
///
/// This enum represents all possible errors an HTTP handler can return.
/// Each variant can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use mingle_push::backend::error::{AuthError, BackendError};
/// use axum::http::StatusCode;
///
/// let err: BackendError = AuthError::invalid("expired").into();
/// assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Credential could not be validated
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Message store error
    #[error(transparent)]
    StoreError(#[from] StoreError),
}

impl BackendError {
    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Unauthorized` - 401 Unauthorized
    /// - `StoreError` - 400 for invalid messages, 503 when unavailable
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::StoreError(err) => match err {
                StoreError::Invalid { .. } => StatusCode::BAD_REQUEST,
                StoreError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    /// Get the error message
    ///
    /// Credential failures answer with a fixed message so the response does
    /// not reveal why a token was refused.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized(_) => "invalid or expired credential".to_string(),
            Self::StoreError(err) => err.to_string(),
        }
    }
}
