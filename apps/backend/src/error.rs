use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::error::AuthError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// RFC 7807 body returned for every error response.
#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Upstream error: {detail}")]
    Upstream { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Auth(auth) => match auth {
                AuthError::MissingCredential => ErrorCode::UnauthorizedMissingBearer,
                AuthError::InvalidCredential { .. } => ErrorCode::UnauthorizedInvalidJwt,
                AuthError::ExpiredCredential => ErrorCode::UnauthorizedExpiredJwt,
                AuthError::IdentityMissing => ErrorCode::UnauthorizedIdentityMissing,
                AuthError::PermissionDenied => ErrorCode::Forbidden,
                AuthError::Federation(_) => ErrorCode::FederationFailed,
            },
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Upstream { .. } => ErrorCode::UpstreamError,
        }
    }

    /// Client-facing detail. Token failure causes stay in the logs.
    fn detail(&self) -> String {
        match self {
            AppError::Auth(auth) => match auth {
                AuthError::MissingCredential => "Missing Authorization header".to_string(),
                AuthError::InvalidCredential { .. } => "Invalid JWT".to_string(),
                AuthError::ExpiredCredential => "Token expired".to_string(),
                AuthError::IdentityMissing => "Email not found in token".to_string(),
                AuthError::PermissionDenied => {
                    "You do not have permission to modify this listing".to_string()
                }
                AuthError::Federation(message) => format!("Invalid Google token: {message}"),
            },
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Db { .. } => "Database error".to_string(),
            AppError::DbUnavailable { .. } => "Database unavailable".to_string(),
            AppError::Config { detail } => detail.clone(),
            AppError::Internal { .. } => "Internal server error".to_string(),
            AppError::Upstream { .. } => "Upstream service failed".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(auth) if auth.is_unauthenticated() => StatusCode::UNAUTHORIZED,
            AppError::Auth(_) => StatusCode::FORBIDDEN,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::RecordNotFound(detail) => AppError::not_found(ErrorCode::NotFound, detail),
            DbErr::ConnectionAcquire(err) => AppError::db_unavailable(err.to_string()),
            DbErr::Conn(err) => AppError::db_unavailable(err.to_string()),
            other => AppError::db(other.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(
                %trace_id,
                code = %code,
                error = %Redacted(&self.to_string()),
                "request failed"
            );
        } else if let AppError::Auth(auth) = self {
            let error = auth.to_string();
            warn!(%trace_id, code = %code, error = %Redacted(&error), "request rejected");
        }

        let problem_details = ProblemDetails {
            type_: format!("https://lostpets.app/errors/{code}"),
            title: Self::humanize_code(code.as_str()),
            status: status.as_u16(),
            detail,
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
