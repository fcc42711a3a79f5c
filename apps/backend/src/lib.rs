#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

pub use auth::claims::{Claims, IdentityProfile};
pub use auth::error::AuthError;
pub use auth::identity::{resolve_caller, Caller};
pub use auth::jwt::{mint_access_token, verify_access_token};
pub use auth::ownership::{authorize, ensure_owner, Owned};
pub use config::app::AppConfig;
pub use config::db::{db_url, DbProfile};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{CurrentUser, ValidatedJson};
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::{AppState, FederationConfig, UploadConfig};
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
