use actix_web::web;

pub mod auth;
pub mod health;
pub mod lost_listings;
pub mod sightings;
pub mod uploads;

/// Register every route. `main.rs` wraps the result in CORS and the
/// request logging middleware; tests register it bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
    cfg.service(web::scope("/api/image-upload").configure(uploads::configure_routes));
    cfg.service(web::scope("/api/lost-listing").configure(lost_listings::configure_routes));
    cfg.service(web::scope("/api/sighting-listing").configure(sightings::configure_routes));
}
