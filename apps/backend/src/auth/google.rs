//! Google ID token verification against Google's published JWKS.
//!
//! Keys are fetched on every call. There is no cache and no retry; a
//! failed fetch fails the login.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::auth::error::AuthError;
use crate::auth::federation::{ExternalClaims, IdTokenVerifier};
use crate::error::AppError;

pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct GoogleIdTokenVerifier {
    client: reqwest::Client,
    jwks_url: String,
}

impl GoogleIdTokenVerifier {
    pub fn new(jwks_url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            jwks_url: jwks_url.into(),
        })
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        debug!(url = %self.jwks_url, "fetching JWKS");

        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::federation(format!("JWKS fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::federation(format!(
                "JWKS endpoint returned HTTP {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::federation(format!("JWKS parse failed: {e}")))
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleIdTokenVerifier {
    async fn verify(&self, id_token: &str, audience: &str) -> Result<ExternalClaims, AuthError> {
        let header = decode_header(id_token)
            .map_err(|e| AuthError::federation(format!("malformed id token: {e}")))?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::federation(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| AuthError::federation("id token has no key id"))?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::federation(format!("no JWKS key for kid '{kid}'")))?;
        let key = DecodingKey::from_jwk(jwk)
            .map_err(|e| AuthError::federation(format!("unusable JWKS key: {e}")))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[audience]);
        validation.set_issuer(&GOOGLE_ISSUERS);

        decode::<ExternalClaims>(id_token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::federation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn garbage_token_fails_before_any_fetch() {
        // Unroutable URL: reaching the network would surface a fetch error instead.
        let verifier = GoogleIdTokenVerifier::new("http://127.0.0.1:9/certs").unwrap();
        let err = verifier.verify("not-a-jwt", "client").await.unwrap_err();
        match err {
            AuthError::Federation(msg) => assert!(msg.starts_with("malformed id token")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn hs256_token_is_rejected() {
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({ "email": "a@x.com", "exp": 4_000_000_000u64 }),
            &jsonwebtoken::EncodingKey::from_secret(b"s"),
        )
        .unwrap();
        let verifier = GoogleIdTokenVerifier::new("http://127.0.0.1:9/certs").unwrap();
        let err = verifier.verify(&token, "client").await.unwrap_err();
        assert!(matches!(err, AuthError::Federation(ref m) if m.contains("unexpected algorithm")));
    }

    #[tokio::test]
    async fn unreachable_jwks_is_federation_error() {
        let mut header = jsonwebtoken::Header::new(Algorithm::RS256);
        header.kid = Some("k1".into());
        // Signature is never checked: the fetch fails first.
        let token = format!(
            "{}.e30.c2ln",
            base64::Engine::encode(
                &base64::engine::general_purpose::URL_SAFE_NO_PAD,
                serde_json::to_vec(&header).unwrap()
            )
        );
        let verifier = GoogleIdTokenVerifier::new("http://127.0.0.1:9/certs").unwrap();
        let err = verifier.verify(&token, "client").await.unwrap_err();
        assert!(matches!(err, AuthError::Federation(ref m) if m.starts_with("JWKS fetch failed")));
    }
}
