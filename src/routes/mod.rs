pub mod band_routes;
pub mod booking_routes;
pub mod event_routes;
pub mod profile_routes;
pub mod review_routes;
pub mod session_routes;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Scope matching is greedy on the prefix; the more specific scopes must
    // be registered before the plain /api/events and /api/profiles ones.
    session_routes::configure(cfg);
    booking_routes::configure(cfg);
    band_routes::configure(cfg);
    review_routes::configure(cfg);
    event_routes::configure(cfg);
    profile_routes::configure(cfg);
}
