use actix_web::web;

use crate::handlers::band_handlers::{
    accept_band_request, create_band, create_band_request, disband_band, get_band,
    list_band_members, list_band_requests, list_bands, list_profile_bands,
    reject_band_request, transfer_leadership,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bands")
            .route("", web::get().to(list_bands))
            .route("", web::post().to(create_band))
            .route("/{band_id}", web::get().to(get_band))
            .route("/{band_id}", web::delete().to(disband_band))
            .route("/{band_id}/members", web::get().to(list_band_members))
            .route("/{band_id}/requests", web::get().to(list_band_requests))
            .route("/{band_id}/requests", web::post().to(create_band_request))
            .route("/{band_id}/transfer", web::post().to(transfer_leadership))
    );

    cfg.service(
        web::scope("/api/band-requests")
            .route("/{request_id}/accept", web::put().to(accept_band_request))
            .route("/{request_id}/reject", web::put().to(reject_band_request))
    );

    cfg.service(
        web::scope("/api/profiles/{profile_id}/bands")
            .route("", web::get().to(list_profile_bands))
    );
}
