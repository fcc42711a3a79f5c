//! Sighting listings. Same ownership rules as lost listings; the pet name
//! is optional and a spotted location may carry a city.

use sea_orm::prelude::Uuid;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, IntoActiveModel, NotSet, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::ownership::ensure_owner;
use crate::entities::sighting_listing;
use crate::entities::StringList;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::locations::{self as locations_repo, NewLocation};
use crate::repos::sightings as sightings_repo;
use crate::repos::ListingFilter;
use crate::services::listings::{non_blank, non_empty, parse_date, Coords, ListPage, LocationView};

const RESOURCE: &str = "sighting_listing";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingRequest {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub gender: Option<String>,
    pub breed: Option<Vec<String>>,
    pub color: Option<Vec<String>>,
    pub date_spotted: Option<String>,
    pub location: Option<String>,
    pub postal_code: Option<String>,
    pub location_coords: Option<Coords>,
    pub city: Option<String>,
    pub province_or_state: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub pet_id: Option<String>,
    pub is_found: Option<bool>,
    pub image_urls: Option<Vec<String>>,
}

impl SightingRequest {
    /// City fields only count when all three are present.
    fn city(&self) -> Option<(&str, &str, &str)> {
        fn field(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        Some((
            field(&self.city)?,
            field(&self.province_or_state)?,
            field(&self.country)?,
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SightingView {
    pub id: i32,
    pub listing_owner: Uuid,
    pub is_found: bool,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub date_found: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub breed: Vec<String>,
    pub color: Vec<String>,
    pub animal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_urls: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date_spotted: OffsetDateTime,
    pub spotted_location: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl SightingView {
    fn new(model: sighting_listing::Model, location: Option<LocationView>) -> Self {
        Self {
            id: model.id,
            listing_owner: model.listing_owner,
            is_found: model.is_found,
            date_found: model.date_found,
            pet_name: model.pet_name,
            pet_id: model.pet_id,
            gender: model.gender,
            breed: model.breed.0,
            color: model.color.0,
            animal_type: model.animal_type,
            description: model.description,
            image_urls: model.image_urls.0,
            date_spotted: model.date_spotted,
            spotted_location: model.spotted_location,
            location,
            created_at: model.created_at,
        }
    }
}

async fn spotted_location<C: ConnectionTrait>(
    conn: &C,
    req: &SightingRequest,
    street: &str,
    coords: Coords,
) -> Result<i32, DbErr> {
    let city_id = match req.city() {
        Some((city, province, country)) => {
            Some(locations_repo::get_or_create_city(conn, city, province, country).await?)
        }
        None => None,
    };
    locations_repo::get_or_create_location(
        conn,
        NewLocation {
            street_address: street.trim().to_string(),
            postal_code: non_blank(req.postal_code.clone()),
            latitude: coords.lat,
            longitude: coords.lng,
            city_id,
        },
    )
    .await
}

pub async fn create(
    db: &DatabaseConnection,
    owner: Uuid,
    req: SightingRequest,
) -> Result<i32, AppError> {
    let missing = [
        ("animalType", non_blank(req.animal_type.clone()).is_none()),
        ("color", non_empty(req.color.clone()).is_none()),
        ("dateSpotted", non_blank(req.date_spotted.clone()).is_none()),
        ("location", non_blank(req.location.clone()).is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            format!("missing required fields: {}", missing.join(", ")),
        ));
    }
    let coords = req.location_coords.ok_or_else(|| {
        AppError::invalid(
            ErrorCode::ValidationError,
            "locationCoords (lat, lng) are required",
        )
    })?;
    let date_spotted = parse_date(req.date_spotted.as_deref().unwrap_or_default(), "dateSpotted")?;

    let txn = db.begin().await?;

    let street = req.location.clone().unwrap_or_default();
    let location_id = spotted_location(&txn, &req, &street, coords).await?;

    let is_found = req.is_found.unwrap_or(false);
    let now = OffsetDateTime::now_utc();
    let sighting = sightings_repo::insert(
        &txn,
        sighting_listing::ActiveModel {
            id: NotSet,
            listing_owner: Set(owner),
            is_found: Set(is_found),
            date_found: Set(is_found.then_some(now)),
            pet_name: Set(non_blank(req.name).map(|n| n.trim().to_string())),
            pet_id: Set(non_blank(req.pet_id)),
            gender: Set(non_blank(req.gender)),
            breed: Set(StringList(req.breed.unwrap_or_default())),
            color: Set(StringList(req.color.unwrap_or_default())),
            animal_type: Set(req.animal_type.unwrap_or_default().trim().to_string()),
            description: Set(non_blank(req.description)),
            image_urls: Set(StringList(req.image_urls.unwrap_or_default())),
            date_spotted: Set(date_spotted),
            spotted_location: Set(location_id),
            created_at: Set(now),
        },
    )
    .await?;

    txn.commit().await?;

    info!(listing_id = sighting.id, %owner, "sighting created");
    Ok(sighting.id)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<SightingView, AppError> {
    let (sighting, location) = sightings_repo::find_with_location(db, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(SightingView::new(sighting, location.map(LocationView::from)))
}

pub async fn list(
    db: &DatabaseConnection,
    filter: ListingFilter,
) -> Result<ListPage<SightingView>, AppError> {
    let rows = sightings_repo::list(db, &filter).await?;
    let data = rows
        .into_iter()
        .map(|(sighting, location)| SightingView::new(sighting, location.map(LocationView::from)))
        .collect();
    Ok(ListPage::new(data, &filter))
}

pub async fn update(
    db: &DatabaseConnection,
    caller: Uuid,
    caller_email: &str,
    id: i32,
    req: SightingRequest,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let sighting = sightings_repo::find_by_id(&txn, id)
        .await?
        .ok_or_else(not_found)?;
    if let Err(denied) = ensure_owner(&caller, &sighting) {
        security::ownership_denied(caller_email, RESOURCE, i64::from(id));
        return Err(denied.into());
    }

    let mut active = sighting.into_active_model();
    let mut changed = false;

    if let (Some(street), Some(coords)) = (non_blank(req.location.clone()), req.location_coords) {
        let location_id = spotted_location(&txn, &req, &street, coords).await?;
        active.spotted_location = Set(location_id);
        changed = true;
    }
    if let Some(name) = non_blank(req.name) {
        active.pet_name = Set(Some(name.trim().to_string()));
        changed = true;
    }
    if let Some(animal_type) = non_blank(req.animal_type) {
        active.animal_type = Set(animal_type.trim().to_string());
        changed = true;
    }
    if let Some(gender) = req.gender {
        active.gender = Set(Some(gender));
        changed = true;
    }
    if let Some(breed) = non_empty(req.breed) {
        active.breed = Set(StringList(breed));
        changed = true;
    }
    if let Some(color) = non_empty(req.color) {
        active.color = Set(StringList(color));
        changed = true;
    }
    if let Some(raw) = non_blank(req.date_spotted) {
        active.date_spotted = Set(parse_date(&raw, "dateSpotted")?);
        changed = true;
    }
    if let Some(description) = non_blank(req.description) {
        active.description = Set(Some(description));
        changed = true;
    }
    if let Some(pet_id) = req.pet_id {
        active.pet_id = Set(Some(pet_id));
        changed = true;
    }
    if let Some(is_found) = req.is_found {
        active.is_found = Set(is_found);
        active.date_found = Set(is_found.then(OffsetDateTime::now_utc));
        changed = true;
    }
    if let Some(image_urls) = req.image_urls {
        active.image_urls = Set(StringList(image_urls));
        changed = true;
    }

    if !changed {
        return Err(AppError::bad_request(
            ErrorCode::NoFieldsToUpdate,
            "no fields to update",
        ));
    }

    sightings_repo::update(&txn, active).await?;
    txn.commit().await?;

    info!(listing_id = id, "sighting updated");
    Ok(())
}

pub async fn delete(
    db: &DatabaseConnection,
    caller: Uuid,
    caller_email: &str,
    id: i32,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let sighting = sightings_repo::find_by_id(&txn, id)
        .await?
        .ok_or_else(not_found)?;
    if let Err(denied) = ensure_owner(&caller, &sighting) {
        security::ownership_denied(caller_email, RESOURCE, i64::from(id));
        return Err(denied.into());
    }

    sightings_repo::delete(&txn, id).await?;
    txn.commit().await?;

    info!(listing_id = id, "sighting deleted");
    Ok(())
}

fn not_found() -> AppError {
    AppError::not_found(ErrorCode::ListingNotFound, "sighting not found")
}
