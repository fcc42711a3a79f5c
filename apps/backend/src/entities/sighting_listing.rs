use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::string_list::StringList;
use crate::auth::ownership::Owned;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sighting_listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub listing_owner: Uuid,
    pub is_found: bool,
    pub date_found: Option<OffsetDateTime>,
    pub pet_name: Option<String>,
    pub pet_id: Option<String>,
    pub gender: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub breed: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub color: StringList,
    pub animal_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub image_urls: StringList,
    pub date_spotted: OffsetDateTime,
    pub spotted_location: i32,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ListingOwner",
        to = "super::users::Column::UserUuid",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::locations::Entity",
        from = "Column::SpottedLocation",
        to = "super::locations::Column::Id"
    )]
    SpottedLocation,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpottedLocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Owned for Model {
    type OwnerId = Uuid;

    fn owner_id(&self) -> Option<&Uuid> {
        Some(&self.listing_owner)
    }
}
