/**
 * Bearer Authentication
 *
 * Extracts the employee behind an `Authorization: Bearer <token>` header for
 * API routes. Validation goes through the same `CredentialValidator` the
 * subscription handshake uses, so both surfaces accept exactly the same
 * tokens.
 */

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::error::{AuthError, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::UserId;

/// Authenticated employee, extracted from the bearer token
///
/// Rejects the request with `401 Unauthorized` when the header is missing,
/// malformed, or carries a token that does not validate.
#[derive(Clone, Debug)]
pub struct AuthUser(pub UserId);

/// Pull the token out of an `Authorization` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                AuthError::invalid("missing Authorization header")
            })?;

        let token = bearer_token(header).ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            AuthError::invalid("expected a bearer token")
        })?;

        let user_id = state.validator.validate(token).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            e
        })?;

        Ok(AuthUser(user_id))
    }
}
