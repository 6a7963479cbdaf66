use actix_web::web;

use crate::handlers::review_handlers::{create_review, list_reviews};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profiles/{profile_id}/reviews")
            .route("", web::get().to(list_reviews))
            .route("", web::post().to(create_review))
    );
}
