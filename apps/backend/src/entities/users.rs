use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_uuid: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lost_pet_listing::Entity")]
    LostPetListing,
    #[sea_orm(has_many = "super::sighting_listing::Entity")]
    SightingListing,
}

impl Related<super::lost_pet_listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LostPetListing.def()
    }
}

impl Related<super::sighting_listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SightingListing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
