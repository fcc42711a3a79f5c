//! Claims carried by backend-issued access tokens.

use serde::{Deserialize, Serialize};

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Canonical user identifier. Defaults to empty so a token without it
    /// surfaces as `IdentityMissing` rather than a parse failure.
    #[serde(default)]
    pub email: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at (seconds since epoch)
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Identity fields embedded into a token at login. Expiry is never part of
/// this: lifetime is decided by `SecurityConfig::token_ttl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl IdentityProfile {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            picture: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_picture(mut self, picture: impl Into<String>) -> Self {
        self.picture = Some(picture.into());
        self
    }
}
