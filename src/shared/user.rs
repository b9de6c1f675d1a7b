/**
 * User Identity
 *
 * Employees are identified by their employee code. The code travels inside
 * access tokens as the `sub` claim and keys every push channel, so it is kept
 * opaque here: only equality, hashing and display.
 */
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque employee identity
///
/// # Example
/// ```rust
/// use mingle_push::shared::UserId;
///
/// let user = UserId::from("E100");
/// assert_eq!(user.as_str(), "E100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
