pub mod band_models;
pub mod booking_models;
pub mod event_models;
pub mod pagination_models;
pub mod profile_models;
pub mod review_models;
pub mod session_models;
pub mod token_models;
