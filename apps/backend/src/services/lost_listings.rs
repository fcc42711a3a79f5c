//! Lost pet listings: public read, owner-only write.

use sea_orm::prelude::Uuid;
use sea_orm::{DatabaseConnection, IntoActiveModel, NotSet, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::ownership::ensure_owner;
use crate::entities::lost_pet_listing;
use crate::entities::StringList;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::locations::{self as locations_repo, NewLocation};
use crate::repos::lost_listings as listings_repo;
use crate::repos::ListingFilter;
use crate::services::listings::{non_blank, non_empty, parse_date, Coords, ListPage, LocationView};

const RESOURCE: &str = "lost_pet_listing";

/// Body for create and partial update. Create requires `name`,
/// `animalType`, `color`, `dateLost`, `location` and `locationCoords`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostListingRequest {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub gender: Option<String>,
    pub breed: Option<Vec<String>>,
    pub color: Option<Vec<String>>,
    pub age: Option<String>,
    pub date_lost: Option<String>,
    pub location: Option<String>,
    pub postal_code: Option<String>,
    pub location_coords: Option<Coords>,
    pub description: Option<String>,
    pub pet_id: Option<String>,
    pub is_found: Option<bool>,
    pub image_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LostListingView {
    pub id: i32,
    pub listing_owner: Uuid,
    pub is_found: bool,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub date_found: Option<OffsetDateTime>,
    pub pet_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub breed: Vec<String>,
    pub color: Vec<String>,
    pub animal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    pub description: String,
    pub image_urls: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date_lost: OffsetDateTime,
    pub last_seen_location: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl LostListingView {
    fn new(model: lost_pet_listing::Model, location: Option<LocationView>) -> Self {
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
            age: model.age,
            description: model.description,
            image_urls: model.image_urls.0,
            date_lost: model.date_lost,
            last_seen_location: model.last_seen_location,
            location,
            created_at: model.created_at,
        }
    }
}

pub async fn create(
    db: &DatabaseConnection,
    owner: Uuid,
    req: LostListingRequest,
) -> Result<i32, AppError> {
    let missing = [
        ("name", non_blank(req.name.clone()).is_none()),
        ("animalType", non_blank(req.animal_type.clone()).is_none()),
        ("color", non_empty(req.color.clone()).is_none()),
        ("dateLost", non_blank(req.date_lost.clone()).is_none()),
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
    let date_lost = parse_date(req.date_lost.as_deref().unwrap_or_default(), "dateLost")?;

    let txn = db.begin().await?;

    let location_id = locations_repo::get_or_create_location(
        &txn,
        NewLocation {
            street_address: req.location.unwrap_or_default().trim().to_string(),
            postal_code: non_blank(req.postal_code),
            latitude: coords.lat,
            longitude: coords.lng,
            city_id: None,
        },
    )
    .await?;

    let is_found = req.is_found.unwrap_or(false);
    let now = OffsetDateTime::now_utc();
    let listing = listings_repo::insert(
        &txn,
        lost_pet_listing::ActiveModel {
            id: NotSet,
            listing_owner: Set(owner),
            is_found: Set(is_found),
            date_found: Set(is_found.then_some(now)),
            pet_name: Set(req.name.unwrap_or_default().trim().to_string()),
            pet_id: Set(non_blank(req.pet_id)),
            gender: Set(non_blank(req.gender)),
            breed: Set(StringList(req.breed.unwrap_or_default())),
            color: Set(StringList(req.color.unwrap_or_default())),
            animal_type: Set(req.animal_type.unwrap_or_default().trim().to_string()),
            age: Set(non_blank(req.age)),
            description: Set(req.description.unwrap_or_default()),
            image_urls: Set(StringList(req.image_urls.unwrap_or_default())),
            date_lost: Set(date_lost),
            last_seen_location: Set(location_id),
            created_at: Set(now),
        },
    )
    .await?;

    txn.commit().await?;

    info!(listing_id = listing.id, %owner, "lost pet listing created");
    Ok(listing.id)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<LostListingView, AppError> {
    let (listing, location) = listings_repo::find_with_location(db, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(LostListingView::new(listing, location.map(LocationView::from)))
}

pub async fn list(
    db: &DatabaseConnection,
    filter: ListingFilter,
) -> Result<ListPage<LostListingView>, AppError> {
    let rows = listings_repo::list(db, &filter).await?;
    let data = rows
        .into_iter()
        .map(|(listing, location)| LostListingView::new(listing, location.map(LocationView::from)))
        .collect();
    Ok(ListPage::new(data, &filter))
}

/// Partial update. The owner check runs against the row read inside the
/// same transaction as the write; a denied caller changes nothing.
pub async fn update(
    db: &DatabaseConnection,
    caller: Uuid,
    caller_email: &str,
    id: i32,
    req: LostListingRequest,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let listing = listings_repo::find_by_id(&txn, id)
        .await?
        .ok_or_else(not_found)?;
    if let Err(denied) = ensure_owner(&caller, &listing) {
        security::ownership_denied(caller_email, RESOURCE, i64::from(id));
        return Err(denied.into());
    }

    let mut active = listing.into_active_model();
    let mut changed = false;

    if let Some(name) = non_blank(req.name) {
        active.pet_name = Set(name.trim().to_string());
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
    if let Some(age) = req.age {
        active.age = Set(Some(age));
        changed = true;
    }
    if let Some(raw) = non_blank(req.date_lost) {
        active.date_lost = Set(parse_date(&raw, "dateLost")?);
        changed = true;
    }
    if let Some(description) = non_blank(req.description) {
        active.description = Set(description);
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
    if let (Some(street), Some(coords)) = (non_blank(req.location), req.location_coords) {
        let location_id = locations_repo::get_or_create_location(
            &txn,
            NewLocation {
                street_address: street.trim().to_string(),
                postal_code: non_blank(req.postal_code),
                latitude: coords.lat,
                longitude: coords.lng,
                city_id: None,
            },
        )
        .await?;
        active.last_seen_location = Set(location_id);
        changed = true;
    }

    if !changed {
        return Err(AppError::bad_request(
            ErrorCode::NoFieldsToUpdate,
            "no fields to update",
        ));
    }

    listings_repo::update(&txn, active).await?;
    txn.commit().await?;

    info!(listing_id = id, "lost pet listing updated");
    Ok(())
}

pub async fn delete(
    db: &DatabaseConnection,
    caller: Uuid,
    caller_email: &str,
    id: i32,
) -> Result<(), AppError> {
    let txn = db.begin().await?;

    let listing = listings_repo::find_by_id(&txn, id)
        .await?
        .ok_or_else(not_found)?;
    if let Err(denied) = ensure_owner(&caller, &listing) {
        security::ownership_denied(caller_email, RESOURCE, i64::from(id));
        return Err(denied.into());
    }

    listings_repo::delete(&txn, id).await?;
    txn.commit().await?;

    info!(listing_id = id, "lost pet listing deleted");
    Ok(())
}

fn not_found() -> AppError {
    AppError::not_found(ErrorCode::ListingNotFound, "lost pet listing not found")
}

#[cfg(test)]
mod tests {
    use super::LostListingRequest;

    #[test]
    fn test_request_reads_camel_case() {
        let req: LostListingRequest = serde_json::from_value(serde_json::json!({
            "name": "Rex",
            "animalType": "dog",
            "color": ["brown"],
            "dateLost": "2025-03-01T10:00:00Z",
            "location": "123 Main St",
            "locationCoords": { "lat": 49.28, "lng": -123.12 },
            "petId": "chip-42",
            "isFound": false
        }))
        .unwrap();
        assert_eq!(req.name.as_deref(), Some("Rex"));
        assert_eq!(req.animal_type.as_deref(), Some("dog"));
        assert_eq!(req.color, Some(vec!["brown".to_string()]));
        assert_eq!(req.pet_id.as_deref(), Some("chip-42"));
        assert_eq!(req.is_found, Some(false));
        assert!(req.image_urls.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let req: LostListingRequest =
            serde_json::from_value(serde_json::json!({ "owner": "someone-else" })).unwrap();
        assert!(req.name.is_none());
    }
}
