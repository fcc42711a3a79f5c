pub mod listings;
pub mod lost_listings;
pub mod sightings;
pub mod uploads;
pub mod users;
