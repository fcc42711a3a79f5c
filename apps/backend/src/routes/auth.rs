use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::federation::federate;
use crate::auth::jwt::mint_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::logging::security;
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
}

/// Exchange a Google ID token for a first-party access token, creating the
/// user on first login.
async fn google_login(
    body: ValidatedJson<GoogleLoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let federation = app_state
        .federation
        .as_ref()
        .ok_or_else(|| AppError::config("Google sign-in is not configured"))?;

    let profile = federate(federation.verifier.as_ref(), body.token.trim(), &federation.audience)
        .await
        .map_err(|err| {
            security::federation_failed(&err.to_string());
            err
        })?;

    let db = require_db(&app_state)?;
    let user = ensure_user(db, &profile).await?;

    let token = mint_access_token(&profile, SystemTime::now(), &app_state.security)?;
    tracing::info!(user_uuid = %user.user_uuid, "login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        token,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/google").route(web::post().to(google_login)));
}
