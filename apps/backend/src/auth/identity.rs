//! Resolve the calling user from request headers.

use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use crate::auth::claims::Claims;
use crate::auth::error::AuthError;
use crate::auth::jwt::verify_access_token;
use crate::state::security_config::SecurityConfig;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller: the presented token plus its verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub token: String,
    pub email: String,
    pub claims: Claims,
}

/// Strip one leading `"Bearer "` (if present) and surrounding whitespace.
pub fn strip_bearer(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim()
}

/// Pull the bare token out of the Authorization header.
///
/// Header lookup is case-insensitive. A missing header is
/// `MissingCredential`; a present but unusable one is `InvalidCredential`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::invalid("authorization header is not valid UTF-8"))?;

    let token = strip_bearer(value);
    if token.is_empty() {
        return Err(AuthError::invalid("empty bearer token"));
    }
    Ok(token)
}

/// Locate, verify, and resolve the bearer token on a request.
pub fn resolve_caller(headers: &HeaderMap, security: &SecurityConfig) -> Result<Caller, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verify_access_token(token, security)?;

    Ok(Caller {
        token: token.to_string(),
        email: claims.email.clone(),
        claims,
    })
}
