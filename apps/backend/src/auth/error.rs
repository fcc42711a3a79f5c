//! Authentication and authorization failure kinds.
//!
//! Every failure produced by the token codec, the identity extractor, the
//! ownership guard, and the federation adapter is one of these variants.
//! Callers match on the kind; HTTP mapping lives in `crate::error`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No Authorization header on the request.
    #[error("missing authorization header")]
    MissingCredential,
    /// Token failed structural parsing, signature verification, or carried
    /// malformed claims. `reason` preserves the underlying cause.
    #[error("invalid token: {reason}")]
    InvalidCredential { reason: String },
    /// Token is authentic but its `exp` is at or before now.
    #[error("token has expired")]
    ExpiredCredential,
    /// Verified token has no usable `email`.
    #[error("email not found in token")]
    IdentityMissing,
    /// Caller is authenticated but does not own the targeted resource.
    #[error("permission denied")]
    PermissionDenied,
    /// Third-party identity token was rejected.
    #[error("identity federation failed: {0}")]
    Federation(String),
}

impl AuthError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidCredential {
            reason: reason.into(),
        }
    }

    pub fn federation(message: impl Into<String>) -> Self {
        Self::Federation(message.into())
    }

    /// True for the kinds that mean "who are you?" rather than "you may not".
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, Self::PermissionDenied)
    }
}
