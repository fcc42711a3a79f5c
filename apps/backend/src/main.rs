use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use lostpets_backend::auth::google::GoogleIdTokenVerifier;
use lostpets_backend::config::app::AppConfig;
use lostpets_backend::config::db::DbProfile;
use lostpets_backend::infra::s3::S3UploadSigner;
use lostpets_backend::infra::state::build_state;
use lostpets_backend::middleware::cors::cors_middleware;
use lostpets_backend::middleware::request_trace::RequestTrace;
use lostpets_backend::middleware::structured_logger::StructuredLogger;
use lostpets_backend::middleware::trace_span::TraceSpan;
use lostpets_backend::routes;
use lostpets_backend::state::app_state::{FederationConfig, UploadConfig};
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let verifier = match GoogleIdTokenVerifier::new(config.google_jwks_url.clone()) {
        Ok(verifier) => verifier,
        Err(e) => {
            error!(error = %e, "failed to build Google token verifier");
            std::process::exit(1);
        }
    };

    let uploads = match &config.image_bucket {
        Some(bucket) => Some(UploadConfig {
            signer: Arc::new(S3UploadSigner::from_env().await),
            bucket: bucket.clone(),
        }),
        None => {
            warn!("IMAGE_BUCKET not set; image uploads are disabled");
            None
        }
    };

    let app_state = match build_state(config.security())
        .with_db(DbProfile::Prod)
        .with_federation(FederationConfig {
            verifier: Arc::new(verifier),
            audience: config.google_client_id.clone(),
        })
        .with_uploads(uploads)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting lost pets backend");

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(cors_middleware(&origins))
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
