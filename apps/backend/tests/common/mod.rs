#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use async_trait::async_trait;
use lostpets_backend::auth::claims::IdentityProfile;
use lostpets_backend::auth::error::AuthError;
use lostpets_backend::auth::federation::{ExternalClaims, IdTokenVerifier};
use lostpets_backend::auth::jwt::mint_access_token;
use lostpets_backend::config::db::DbProfile;
use lostpets_backend::error::AppError;
use lostpets_backend::infra::state::build_state;
use lostpets_backend::middleware::request_trace::RequestTrace;
use lostpets_backend::routes;
use lostpets_backend::services::uploads::UploadSigner;
use lostpets_backend::services::users::ensure_user;
use lostpets_backend::state::app_state::{AppState, FederationConfig, UploadConfig};
use lostpets_backend::state::security_config::SecurityConfig;
use sea_orm::prelude::Uuid;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
pub const TEST_AUDIENCE: &str = "test-client-id.apps.googleusercontent.com";
pub const TEST_BUCKET: &str = "lostpets-test-images";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// The full route table behind `RequestTrace`, as `main` serves it minus
/// CORS and access logging.
pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

/// State with no database at all; anything past authentication fails 503.
pub fn state_without_db() -> AppState {
    AppState::new_without_db(security())
}

/// Fresh in-memory SQLite with migrations applied.
pub async fn state_with_db() -> AppState {
    build_state(security())
        .with_db(DbProfile::InMemory)
        .build()
        .await
        .expect("in-memory state should build")
}

pub fn bearer(email: &str) -> String {
    let token = mint_access_token(&IdentityProfile::new(email), SystemTime::now(), &security())
        .expect("should mint token");
    format!("Bearer {token}")
}

pub fn expired_bearer(email: &str) -> String {
    let issued = SystemTime::now() - Duration::from_secs(7200);
    let token = mint_access_token(&IdentityProfile::new(email), issued, &security())
        .expect("should mint token");
    format!("Bearer {token}")
}

/// Insert the user row a federated login would create.
pub async fn seed_user(state: &AppState, email: &str) -> Uuid {
    let db = state.db().expect("state should have a database");
    ensure_user(db, &IdentityProfile::new(email))
        .await
        .expect("user should be created")
        .user_uuid
}

/// Verifier that returns canned claims for one accepted token.
#[derive(Debug)]
pub struct StubVerifier {
    pub accepted_token: String,
    pub claims: ExternalClaims,
}

impl StubVerifier {
    pub fn accepting(token: &str, email: &str) -> Self {
        Self {
            accepted_token: token.to_string(),
            claims: ExternalClaims {
                email: Some(email.to_string()),
                name: Some("Test Owner".to_string()),
                picture: None,
            },
        }
    }
}

#[async_trait]
impl IdTokenVerifier for StubVerifier {
    async fn verify(&self, id_token: &str, audience: &str) -> Result<ExternalClaims, AuthError> {
        if audience != TEST_AUDIENCE {
            return Err(AuthError::federation("audience mismatch"));
        }
        if id_token != self.accepted_token {
            return Err(AuthError::federation("signature verification failed"));
        }
        Ok(self.claims.clone())
    }
}

pub fn federation(verifier: StubVerifier) -> FederationConfig {
    FederationConfig {
        verifier: Arc::new(verifier),
        audience: TEST_AUDIENCE.to_string(),
    }
}

/// Signer that records what it was asked to sign and returns a fake URL.
#[derive(Debug, Default)]
pub struct StubSigner {
    pub calls: Mutex<Vec<(String, String, String, Duration)>>,
}

#[async_trait]
impl UploadSigner for StubSigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, AppError> {
        self.calls.lock().expect("signer lock").push((
            bucket.to_string(),
            key.to_string(),
            content_type.to_string(),
            expires_in,
        ));
        Ok(format!(
            "https://{bucket}.s3.amazonaws.com/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }
}

pub fn uploads(signer: Arc<StubSigner>) -> UploadConfig {
    UploadConfig {
        signer,
        bucket: TEST_BUCKET.to_string(),
    }
}
