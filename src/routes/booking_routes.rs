use actix_web::web;

use crate::handlers::booking_handlers::{
    create_application, list_event_applications, list_profile_applications,
    update_application_status,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/events/{event_id}/applications")
            .route("", web::get().to(list_event_applications))
            .route("", web::post().to(create_application))
    );

    cfg.service(
        web::scope("/api/profiles/{profile_id}/applications")
            .route("", web::get().to(list_profile_applications))
    );

    cfg.service(
        web::scope("/api/applications")
            .route("/{application_id}/status", web::put().to(update_application_status))
    );
}
