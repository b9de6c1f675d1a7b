/**
 * Credential Validation
 *
 * The notification core only needs one thing from the authentication system:
 * a function from an opaque token to an employee code. `CredentialValidator`
 * is that seam. Production uses `JwtValidator`; tests and local setups can use
 * `StaticTokenValidator` with a fixed token table.
 */

use std::collections::HashMap;

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::AuthError;
use crate::shared::UserId;

/// Maps an opaque access token to the employee it was issued to
pub trait CredentialValidator: Send + Sync {
    /// Validate `token` and return its employee
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidCredential` for malformed, forged or expired tokens.
    fn validate(&self, token: &str) -> Result<UserId, AuthError>;
}

/// Validates HS256 JWTs and reads the employee code from `sub`
#[derive(Clone)]
pub struct JwtValidator {
    secret: String,
}

impl JwtValidator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialValidator for JwtValidator {
    fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let claims = verify_token(token, &self.secret)
            .map_err(|e| AuthError::invalid(format!("token verification failed: {}", e)))?;

        if claims.sub.trim().is_empty() {
            return Err(AuthError::invalid("token has an empty subject"));
        }
        Ok(UserId::from(claims.sub))
    }
}

/// Fixed token table
///
/// # Example
///
/// ```rust
/// use mingle_push::backend::auth::{CredentialValidator, StaticTokenValidator};
///
/// let validator = StaticTokenValidator::new([("tok123", "E100")]);
/// assert_eq!(validator.validate("tok123").unwrap().as_str(), "E100");
/// assert!(validator.validate("bad").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenValidator {
    pub fn new<T, U>(tokens: impl IntoIterator<Item = (T, U)>) -> Self
    where
        T: Into<String>,
        U: Into<UserId>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(token, user)| (token.into(), user.into()))
                .collect(),
        }
    }
}

impl CredentialValidator for StaticTokenValidator {
    fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::invalid("unknown token"))
    }
}
