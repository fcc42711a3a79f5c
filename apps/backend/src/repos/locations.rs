use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::{cities, locations};

#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub street_address: String,
    pub postal_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub city_id: Option<i32>,
}

/// Reuse the city with the same name, province/state, and country.
pub async fn get_or_create_city<C: ConnectionTrait>(
    conn: &C,
    city_name: &str,
    province_or_state: &str,
    country: &str,
) -> Result<i32, DbErr> {
    let existing = cities::Entity::find()
        .filter(cities::Column::CityName.eq(city_name))
        .filter(cities::Column::ProvinceOrState.eq(province_or_state))
        .filter(cities::Column::Country.eq(country))
        .one(conn)
        .await?;
    if let Some(city) = existing {
        return Ok(city.id);
    }

    let city = cities::ActiveModel {
        id: NotSet,
        city_name: Set(city_name.to_string()),
        province_or_state: Set(province_or_state.to_string()),
        country: Set(country.to_string()),
    }
    .insert(conn)
    .await?;
    Ok(city.id)
}

/// Locations are keyed by street address plus exact coordinates.
pub async fn get_or_create_location<C: ConnectionTrait>(
    conn: &C,
    location: NewLocation,
) -> Result<i32, DbErr> {
    let existing = locations::Entity::find()
        .filter(locations::Column::StreetAddress.eq(location.street_address.as_str()))
        .filter(locations::Column::Latitude.eq(location.latitude))
        .filter(locations::Column::Longitude.eq(location.longitude))
        .one(conn)
        .await?;
    if let Some(found) = existing {
        return Ok(found.id);
    }

    let created = locations::ActiveModel {
        id: NotSet,
        street_address: Set(location.street_address),
        postal_code: Set(location.postal_code),
        latitude: Set(location.latitude),
        longitude: Set(location.longitude),
        city_id: Set(location.city_id),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await?;
    Ok(created.id)
}
