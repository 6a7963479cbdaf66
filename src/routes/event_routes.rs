use actix_web::web;

use crate::handlers::event_handlers::{
    create_event, delete_event, get_event, list_events, list_profile_events, update_event,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/events")
            .route("", web::get().to(list_events))
            .route("", web::post().to(create_event))
            .route("/{event_id}", web::get().to(get_event))
            .route("/{event_id}", web::put().to(update_event))
            .route("/{event_id}", web::delete().to(delete_event))
    );

    // Events owned or band-led by a profile
    cfg.service(
        web::scope("/api/profiles/{profile_id}/events")
            .route("", web::get().to(list_profile_events))
    );
}
