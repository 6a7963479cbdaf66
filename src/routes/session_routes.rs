use actix_web::web;

use crate::handlers::session_handlers::{create_session, delete_session, get_session};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/sessions")
            .route("", web::post().to(create_session))
            .route("/{session_id}", web::get().to(get_session))
            .route("/{session_id}", web::delete().to(delete_session))
    );
}
