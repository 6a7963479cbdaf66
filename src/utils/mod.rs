pub mod aggregation_utils;
pub mod auth_utils;
pub mod pagination_utils;
pub mod token_utils;
pub mod validation_utils;
