pub mod band_handlers;
pub mod booking_handlers;
pub mod event_handlers;
pub mod profile_handlers;
pub mod review_handlers;
pub mod session_handlers;
