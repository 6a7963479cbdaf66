pub mod middleware_constants;
pub mod status_constants;
