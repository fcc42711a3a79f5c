use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Listing and login bodies are small; image bytes go straight to the bucket.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// JSON body extractor for listing, login and upload requests. Anything that
/// is not a readable JSON document of the expected shape becomes a 400
/// `VALIDATION_ERROR` problem response.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let path = req.path().to_string();
        let mut payload = payload.take();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(%trace_id, %path, error = %e, "request body read failed");
                    AppError::bad_request(ErrorCode::BadRequest, "request body could not be read")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::invalid(
                        ErrorCode::ValidationError,
                        format!("request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            if body.iter().all(u8::is_ascii_whitespace) {
                return Err(AppError::invalid(
                    ErrorCode::ValidationError,
                    "request body is required",
                ));
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    %trace_id,
                    %path,
                    error = %Redacted(&e.to_string()),
                    body_size = body.len(),
                    "request body rejected"
                );
                AppError::invalid(ErrorCode::ValidationError, describe_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Client-facing reason for a rejected body. Never quotes body content,
/// which may hold an ID token or an address.
fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!(
            "malformed JSON at line {} column {}",
            error.line(),
            error.column()
        ),
        Category::Eof => "malformed JSON: body ends early".to_string(),
        Category::Data => "request body has a field of the wrong type".to_string(),
        Category::Io => "request body could not be read".to_string(),
    }
}
