//! Repository functions (generic over `ConnectionTrait`) returning `DbErr`.
//! Services map errors into `AppError`.

pub mod locations;
pub mod lost_listings;
pub mod sightings;
pub mod users;

use sea_orm::prelude::Uuid;

/// Filters shared by both listing kinds, already clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFilter {
    pub is_found: Option<bool>,
    pub animal_type: Option<String>,
    pub owner: Option<Uuid>,
    pub limit: u64,
    pub offset: u64,
}
