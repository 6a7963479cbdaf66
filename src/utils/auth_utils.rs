use actix_web::{HttpResponse, web::ReqData};

use crate::models::token_models::Claims;

/// Check that the requested resource belongs to the logged-in profile.
/// Returns `Ok(&str)` with the profile id if authorized, otherwise a 404
/// response to avoid leaking info about other profiles.
pub fn check_ownership<'a>(
    path_profile_id: &'a str,
    claims: &'a ReqData<Claims>,
) -> Result<&'a str, HttpResponse> {
    let logged_in_profile_id: &String = &claims.sub;
    if logged_in_profile_id != path_profile_id {
        Err(HttpResponse::NotFound().body("Not Found"))
    } else {
        Ok(logged_in_profile_id)
    }
}
