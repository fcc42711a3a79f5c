use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, IdentityProfile};
use crate::auth::error::AuthError;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Mint an HS256 access token for `profile`, valid for the configured TTL
/// starting at `now`.
pub fn mint_access_token(
    profile: &IdentityProfile,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    if security.jwt_secret.is_empty() {
        return Err(AppError::config("JWT secret is not configured".to_string()));
    }

    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = i64::try_from(security.token_ttl.as_secs())
        .ok()
        .and_then(|ttl| iat.checked_add(ttl))
        .ok_or_else(|| AppError::config("Token TTL is out of range".to_string()))?;

    let claims = Claims {
        email: profile.email.clone(),
        exp,
        iat,
        name: profile.name.clone(),
        picture: profile.picture.clone(),
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a bare token (no `Bearer ` prefix, already trimmed) and return
/// its claims.
///
/// Checks run in this order so that a forged token reads as invalid rather
/// than expired:
/// 1. structure and signature → `InvalidCredential`
/// 2. `exp` present and numeric → `InvalidCredential`
/// 3. `exp` strictly in the future → `ExpiredCredential`
/// 4. non-blank `email` → `IdentityMissing`
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    if token.is_empty() {
        return Err(AuthError::invalid("empty token"));
    }

    // Library-level validation; algorithm pinned to the configured one.
    // A token whose exp equals the current second is already expired.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;
    validation.reject_tokens_expiring_in_less_than = 1;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
        ErrorKind::InvalidSignature => AuthError::invalid("signature mismatch"),
        ErrorKind::MissingRequiredClaim(claim) | ErrorKind::InvalidClaimFormat(claim) => {
            AuthError::invalid(format!("malformed claims: '{claim}' missing or not numeric"))
        }
        ErrorKind::Json(err) => AuthError::invalid(format!("malformed claims: {err}")),
        _ => AuthError::invalid(format!("malformed token: {e}")),
    })?;

    if claims.email.trim().is_empty() {
        return Err(AuthError::IdentityMissing);
    }

    Ok(claims)
}
