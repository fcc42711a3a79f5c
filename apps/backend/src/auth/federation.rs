//! External identity federation: turn a third-party ID token into the
//! identity fields we embed in our own access token.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::claims::IdentityProfile;
use crate::auth::error::AuthError;

/// Claims we read from a verified third-party ID token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExternalClaims {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Verifies a provider ID token's signature, audience, issuer, and expiry.
/// Implementations report every failure as `AuthError::Federation`.
#[async_trait]
pub trait IdTokenVerifier: Send + Sync + fmt::Debug {
    async fn verify(&self, id_token: &str, audience: &str) -> Result<ExternalClaims, AuthError>;
}

/// Validate `id_token` for `audience` and map it to an `IdentityProfile`.
pub async fn federate(
    verifier: &dyn IdTokenVerifier,
    id_token: &str,
    audience: &str,
) -> Result<IdentityProfile, AuthError> {
    let id_token = id_token.trim();
    if id_token.is_empty() {
        return Err(AuthError::federation("id token is empty"));
    }

    let claims = verifier.verify(id_token, audience).await?;
    into_profile(claims)
}

fn into_profile(claims: ExternalClaims) -> Result<IdentityProfile, AuthError> {
    let email = claims
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AuthError::federation("email claim missing"))?;

    Ok(IdentityProfile {
        email,
        name: claims.name.filter(|n| !n.is_empty()),
        picture: claims.picture.filter(|p| !p.is_empty()),
    })
}
