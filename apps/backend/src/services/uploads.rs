//! Presigned image upload URLs.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::UploadConfig;

pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];
const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];
const FALLBACK_EXTENSION: &str = ".jpg";

/// Issues time-limited PUT URLs against object storage.
#[async_trait]
pub trait UploadSigner: Send + Sync + fmt::Debug {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, AppError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub upload_url: String,
    pub file_key: String,
    #[serde(rename = "fileURL")]
    pub file_url: String,
}

/// Content type to sign with; absent or blank means JPEG.
pub fn resolve_content_type(requested: Option<&str>) -> Result<String, AppError> {
    let content_type = match requested.map(str::trim) {
        Some(ct) if !ct.is_empty() => ct.to_ascii_lowercase(),
        _ => return Ok(DEFAULT_CONTENT_TYPE.to_string()),
    };

    if ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        Ok(content_type)
    } else {
        Err(AppError::invalid(
            ErrorCode::UnsupportedContentType,
            format!(
                "invalid content type '{content_type}'; allowed: {}",
                ALLOWED_CONTENT_TYPES.join(", ")
            ),
        ))
    }
}

/// Lower-cased extension of `file_name` if it is an allowed image
/// extension, `.jpg` otherwise.
pub fn normalize_extension(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    ALLOWED_EXTENSIONS
        .iter()
        .find(|allowed| **allowed == ext)
        .copied()
        .unwrap_or(FALLBACK_EXTENSION)
}

/// `uploads/YYYY/MM/DD/<uuid><ext>`, dated in UTC.
pub fn object_key(now: OffsetDateTime, id: Uuid, extension: &str) -> String {
    format!(
        "uploads/{:04}/{:02}/{:02}/{}{}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        id,
        extension
    )
}

pub fn public_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

pub async fn issue_upload_url(
    uploads: &UploadConfig,
    request: UploadRequest,
    now: OffsetDateTime,
) -> Result<UploadTicket, AppError> {
    let file_name = request.file_name.trim();
    if file_name.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "fileName is required",
        ));
    }

    let content_type = resolve_content_type(request.content_type.as_deref())?;
    let key = object_key(now, Uuid::new_v4(), normalize_extension(file_name));

    let upload_url = uploads
        .signer
        .presign_put(&uploads.bucket, &key, &content_type, UPLOAD_URL_TTL)
        .await?;

    info!(file_key = %key, %content_type, "issued upload URL");

    Ok(UploadTicket {
        upload_url,
        file_url: public_url(&uploads.bucket, &key),
        file_key: key,
    })
}
