//! Process configuration, read once at startup.

use std::env;
use std::time::Duration;

use crate::auth::google::GOOGLE_JWKS_URL;
use crate::config::must_var;
use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub google_client_id: String,
    pub google_jwks_url: String,
    /// Upload bucket; uploads answer `CONFIG_ERROR` without it.
    pub image_bucket: Option<String>,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let port = match optional_var("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a port number, got '{raw}'"))
            })?,
            None => 3001,
        };

        let token_ttl = match optional_var("JWT_TTL_SECONDS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "JWT_TTL_SECONDS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            host: optional_var("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            jwt_secret: must_var("JWT_SECRET")?,
            token_ttl,
            google_client_id: must_var("GOOGLE_CLIENT_ID")?,
            google_jwks_url: optional_var("GOOGLE_JWKS_URL")
                .unwrap_or_else(|| GOOGLE_JWKS_URL.to_string()),
            image_bucket: optional_var("IMAGE_BUCKET"),
            cors_allowed_origins: optional_var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes()).with_token_ttl(self.token_ttl)
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
