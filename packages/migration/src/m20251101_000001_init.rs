use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    UserUuid,
    Email,
    Name,
    Picture,
    CreatedAt,
}

#[derive(Iden)]
enum Cities {
    Table,
    Id,
    CityName,
    ProvinceOrState,
    Country,
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
    StreetAddress,
    PostalCode,
    Latitude,
    Longitude,
    CityId,
    CreatedAt,
}

#[derive(Iden)]
enum LostPetListing {
    Table,
    Id,
    ListingOwner,
    IsFound,
    DateFound,
    PetName,
    PetId,
    Gender,
    Breed,
    Color,
    AnimalType,
    Age,
    Description,
    ImageUrls,
    DateLost,
    LastSeenLocation,
    CreatedAt,
}

#[derive(Iden)]
enum SightingListing {
    Table,
    Id,
    ListingOwner,
    IsFound,
    DateFound,
    PetName,
    PetId,
    Gender,
    Breed,
    Color,
    AnimalType,
    Description,
    ImageUrls,
    DateSpotted,
    SpottedLocation,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserUuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Name).string().null())
                    .col(ColumnDef::new(Users::Picture).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Login upserts rely on this for ON CONFLICT (email) DO NOTHING
        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // cities
        manager
            .create_table(
                Table::create()
                    .table(Cities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cities::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Cities::CityName).string().not_null())
                    .col(ColumnDef::new(Cities::ProvinceOrState).string().not_null())
                    .col(ColumnDef::new(Cities::Country).string().not_null())
                    .to_owned(),
            )
            .await?;

        // locations
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Locations::StreetAddress).string().not_null())
                    .col(ColumnDef::new(Locations::PostalCode).string().null())
                    .col(ColumnDef::new(Locations::Latitude).double().not_null())
                    .col(ColumnDef::new(Locations::Longitude).double().not_null())
                    .col(ColumnDef::new(Locations::CityId).integer().null())
                    .col(
                        ColumnDef::new(Locations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_city_id")
                            .from(Locations::Table, Locations::CityId)
                            .to(Cities::Table, Cities::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_locations_address_coords")
                    .table(Locations::Table)
                    .col(Locations::StreetAddress)
                    .col(Locations::Latitude)
                    .col(Locations::Longitude)
                    .to_owned(),
            )
            .await?;

        // lost_pet_listing
        manager
            .create_table(
                Table::create()
                    .table(LostPetListing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LostPetListing::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(LostPetListing::ListingOwner).uuid().not_null())
                    .col(
                        ColumnDef::new(LostPetListing::IsFound)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LostPetListing::DateFound)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(LostPetListing::PetName).string().not_null())
                    .col(ColumnDef::new(LostPetListing::PetId).string().null())
                    .col(ColumnDef::new(LostPetListing::Gender).string().null())
                    .col(ColumnDef::new(LostPetListing::Breed).json_binary().not_null())
                    .col(ColumnDef::new(LostPetListing::Color).json_binary().not_null())
                    .col(ColumnDef::new(LostPetListing::AnimalType).string().not_null())
                    .col(ColumnDef::new(LostPetListing::Age).string().null())
                    .col(ColumnDef::new(LostPetListing::Description).text().not_null())
                    .col(
                        ColumnDef::new(LostPetListing::ImageUrls)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LostPetListing::DateLost)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LostPetListing::LastSeenLocation)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LostPetListing::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lost_pet_listing_owner")
                            .from(LostPetListing::Table, LostPetListing::ListingOwner)
                            .to(Users::Table, Users::UserUuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lost_pet_listing_location")
                            .from(LostPetListing::Table, LostPetListing::LastSeenLocation)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_lost_pet_listing_owner")
                    .table(LostPetListing::Table)
                    .col(LostPetListing::ListingOwner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_lost_pet_listing_created_at")
                    .table(LostPetListing::Table)
                    .col(LostPetListing::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // sighting_listing
        manager
            .create_table(
                Table::create()
                    .table(SightingListing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SightingListing::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(SightingListing::ListingOwner)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SightingListing::IsFound)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SightingListing::DateFound)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(SightingListing::PetName).string().null())
                    .col(ColumnDef::new(SightingListing::PetId).string().null())
                    .col(ColumnDef::new(SightingListing::Gender).string().null())
                    .col(ColumnDef::new(SightingListing::Breed).json_binary().not_null())
                    .col(ColumnDef::new(SightingListing::Color).json_binary().not_null())
                    .col(ColumnDef::new(SightingListing::AnimalType).string().not_null())
                    .col(ColumnDef::new(SightingListing::Description).text().null())
                    .col(
                        ColumnDef::new(SightingListing::ImageUrls)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SightingListing::DateSpotted)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SightingListing::SpottedLocation)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SightingListing::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sighting_listing_owner")
                            .from(SightingListing::Table, SightingListing::ListingOwner)
                            .to(Users::Table, Users::UserUuid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sighting_listing_location")
                            .from(SightingListing::Table, SightingListing::SpottedLocation)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_sighting_listing_owner")
                    .table(SightingListing::Table)
                    .col(SightingListing::ListingOwner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_sighting_listing_created_at")
                    .table(SightingListing::Table)
                    .col(SightingListing::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse dependency order; indexes go with their tables
        manager
            .drop_table(
                Table::drop()
                    .table(SightingListing::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(LostPetListing::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Locations::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cities::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
