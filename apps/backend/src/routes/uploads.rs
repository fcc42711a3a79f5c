use actix_web::{web, HttpResponse};
use time::OffsetDateTime;

use crate::auth::identity::Caller;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::uploads::{issue_upload_url, UploadRequest};
use crate::state::app_state::AppState;

async fn create_upload_url(
    _caller: Caller,
    body: ValidatedJson<UploadRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let uploads = app_state
        .uploads
        .as_ref()
        .ok_or_else(|| AppError::config("image bucket is not configured"))?;

    let ticket = issue_upload_url(uploads, body.into_inner(), OffsetDateTime::now_utc()).await?;
    Ok(HttpResponse::Ok().json(ticket))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_upload_url)));
}
