use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Default access token lifetime (60 minutes).
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Signing settings for first-party access tokens.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared HMAC secret
    pub jwt_secret: Vec<u8>,
    /// Pinned algorithm (HS256)
    pub algorithm: Algorithm,
    /// Lifetime of every token we mint
    pub token_ttl: Duration,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
