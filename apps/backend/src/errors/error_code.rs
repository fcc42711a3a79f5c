//! Error codes for the lost & found pets API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No Authorization header
    UnauthorizedMissingBearer,
    /// Token failed parsing, signature, or claims checks
    UnauthorizedInvalidJwt,
    /// Token has expired
    UnauthorizedExpiredJwt,
    /// Verified token carries no email
    UnauthorizedIdentityMissing,
    /// Caller does not own the resource
    Forbidden,
    /// Third-party identity token rejected
    FederationFailed,

    // Request Validation
    /// Required field missing or malformed
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Path id is not a valid listing id
    InvalidListingId,
    /// Date is neither RFC 3339 nor YYYY-MM-DD
    InvalidDate,
    /// Upload content type outside the allowlist
    UnsupportedContentType,
    /// Partial update carried no fields
    NoFieldsToUpdate,

    // Resource Not Found
    /// Authenticated email has no user row
    UserNotFound,
    /// Listing does not exist
    ListingNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Upstream service (object storage, identity provider) failed
    UpstreamError,
}

impl ErrorCode {
    /// Get the canonical string representation of this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedIdentityMissing => "UNAUTHORIZED_IDENTITY_MISSING",
            Self::Forbidden => "FORBIDDEN",
            Self::FederationFailed => "FEDERATION_FAILED",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidListingId => "INVALID_LISTING_ID",
            Self::InvalidDate => "INVALID_DATE",
            Self::UnsupportedContentType => "UNSUPPORTED_CONTENT_TYPE",
            Self::NoFieldsToUpdate => "NO_FIELDS_TO_UPDATE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ListingNotFound => "LISTING_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::UpstreamError => "UPSTREAM_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
