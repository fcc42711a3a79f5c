use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::ListingFilter;
use crate::entities::{locations, sighting_listing};

pub type ListingWithLocation = (sighting_listing::Model, Option<locations::Model>);

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    listing: sighting_listing::ActiveModel,
) -> Result<sighting_listing::Model, DbErr> {
    listing.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<sighting_listing::Model>, DbErr> {
    sighting_listing::Entity::find_by_id(id).one(conn).await
}

pub async fn find_with_location<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<ListingWithLocation>, DbErr> {
    sighting_listing::Entity::find_by_id(id)
        .find_also_related(locations::Entity)
        .one(conn)
        .await
}

/// Newest first; `id` breaks ties between rows created in the same instant.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    filter: &ListingFilter,
) -> Result<Vec<ListingWithLocation>, DbErr> {
    let mut query = sighting_listing::Entity::find();

    if let Some(is_found) = filter.is_found {
        query = query.filter(sighting_listing::Column::IsFound.eq(is_found));
    }
    if let Some(animal_type) = &filter.animal_type {
        query = query.filter(sighting_listing::Column::AnimalType.eq(animal_type.as_str()));
    }
    if let Some(owner) = filter.owner {
        query = query.filter(sighting_listing::Column::ListingOwner.eq(owner));
    }

    query
        .order_by_desc(sighting_listing::Column::CreatedAt)
        .order_by_desc(sighting_listing::Column::Id)
        .limit(filter.limit)
        .offset(filter.offset)
        .find_also_related(locations::Entity)
        .all(conn)
        .await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    listing: sighting_listing::ActiveModel,
) -> Result<sighting_listing::Model, DbErr> {
    listing.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    let result = sighting_listing::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
