pub mod cities;
pub mod locations;
pub mod lost_pet_listing;
pub mod sighting_listing;
pub mod string_list;
pub mod users;

pub use cities::Entity as Cities;
pub use cities::Model as City;
pub use locations::Entity as Locations;
pub use locations::Model as Location;
pub use lost_pet_listing::Entity as LostPetListings;
pub use lost_pet_listing::Model as LostPetListing;
pub use sighting_listing::Entity as SightingListings;
pub use sighting_listing::Model as SightingListing;
pub use string_list::StringList;
pub use users::Entity as Users;
pub use users::Model as User;
