use actix_web::web;

use crate::handlers::profile_handlers::{create_profile, get_profile, update_profile};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profiles")
            .route("", web::post().to(create_profile))
            .route("/{profile_id}", web::get().to(get_profile))
            .route("/{profile_id}", web::put().to(update_profile))
    );
}
