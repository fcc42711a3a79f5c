use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::identity::Caller;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::listings::{parse_listing_id, ListQuery};
use crate::services::sightings::{self, SightingRequest};
use crate::services::users::require_user_uuid;
use crate::state::app_state::AppState;

async fn create(
    current_user: CurrentUser,
    body: ValidatedJson<SightingRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let id = sightings::create(db, current_user.user_uuid, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Sighting created",
        "id": id,
        "user_uuid": current_user.user_uuid,
    })))
}

async fn list(
    caller: Caller,
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let query = query.into_inner();
    let owner = if query.wants_mine() {
        Some(require_user_uuid(db, &caller.email).await?)
    } else {
        None
    };

    let page = sightings::list(db, query.into_filter(owner)).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn get_one(
    _caller: Caller,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_listing_id(&path)?;
    let db = require_db(&app_state)?;
    let sighting = sightings::get(db, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "data": sighting })))
}

async fn update(
    current_user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<SightingRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_listing_id(&path)?;
    let db = require_db(&app_state)?;
    sightings::update(
        db,
        current_user.user_uuid,
        &current_user.email,
        id,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Sighting updated successfully",
        "id": id,
    })))
}

async fn delete(
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_listing_id(&path)?;
    let db = require_db(&app_state)?;
    sightings::delete(db, current_user.user_uuid, &current_user.email, id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Sighting deleted successfully",
        "id": id,
    })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    );
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_one))
            .route(web::put().to(update))
            .route(web::patch().to(update))
            .route(web::delete().to(delete)),
    );
}
