use actix_web::{web, HttpResponse, Responder, ResponseError};
use actix_web::web::ReqData;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;
use bcrypt::hash;

use crate::db::{get_conn, DbPool};
use crate::models::profile_models::{
    CreateProfile, NewProfile, Profile, ProfileResponse, UpdateProfile, PROFILE_ROLES,
};
use crate::models::token_models::Claims;
use crate::schema::profiles::dsl::*;
use crate::utils::auth_utils::check_ownership;
use crate::utils::validation_utils::ValidationError;

/// Public signup.
pub async fn create_profile(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateProfile>,
) -> impl Responder {
    let data = payload.into_inner();

    if data.display_name.trim().is_empty() || data.password.is_empty() {
        return ValidationError("display_name and password are required".to_string())
            .error_response();
    }
    if !PROFILE_ROLES.contains(&data.role.as_str()) {
        return ValidationError(format!("Unknown profile role: {}", data.role)).error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    // Basic uniqueness check
    let existing = profiles
        .filter(display_name.eq(&data.display_name))
        .first::<Profile>(&mut conn)
        .optional();
    match existing {
        Ok(Some(_)) => return HttpResponse::Conflict().body("display_name already exists"),
        Ok(None) => {}
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let pwd_hash = match hash(&data.password, bcrypt::DEFAULT_COST) {
        Ok(h) => h,
        Err(_) => return HttpResponse::InternalServerError().body("Failed to hash password"),
    };

    let now = Utc::now().naive_utc();
    let new_profile = NewProfile {
        id: Uuid::new_v4().to_string(),
        display_name: data.display_name,
        role: data.role,
        bio: data.bio,
        location: data.location,
        avatar_url: data.avatar_url,
        password_hash: pwd_hash,
        created_at: Some(now),
        updated_at: Some(now),
    };

    match diesel::insert_into(profiles)
        .values(&new_profile)
        .execute(&mut conn)
    {
        Ok(_) => HttpResponse::Created().json(serde_json::json!({
            "id": new_profile.id,
            "display_name": new_profile.display_name,
            "role": new_profile.role,
        })),
        Err(_) => HttpResponse::InternalServerError().body("Failed to create profile"),
    }
}

pub async fn get_profile(
    pool: web::Data<DbPool>,
    profile_id_param: web::Path<String>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let result = profiles
        .filter(id.eq(profile_id_param.into_inner()))
        .first::<Profile>(&mut conn)
        .optional();

    match result {
        Ok(Some(p)) => HttpResponse::Ok().json(ProfileResponse::from(p)),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn update_profile(
    pool: web::Data<DbPool>,
    profile_id_param: web::Path<String>,
    payload: web::Json<UpdateProfile>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let profile_id_param = profile_id_param.into_inner();
    let profile_id = match check_ownership(&profile_id_param, &claims) {
        Ok(p) => p.to_string(),
        Err(resp) => return resp,
    };

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let update_data = payload.into_inner();

    // AsChangeset updates only provided fields; None fields are skipped
    let res = diesel::update(profiles.filter(id.eq(&profile_id)))
        .set((&update_data, updated_at.eq(Some(Utc::now().naive_utc()))))
        .execute(&mut conn);

    match res {
        Ok(affected) if affected > 0 => {
            match profiles
                .filter(id.eq(&profile_id))
                .first::<Profile>(&mut conn)
            {
                Ok(row) => HttpResponse::Ok().json(ProfileResponse::from(row)),
                Err(_) => HttpResponse::Ok().finish(),
            }
        }
        Ok(_) => HttpResponse::NotFound().body("Profile not found"),
        Err(_) => HttpResponse::InternalServerError().body("Failed to update profile"),
    }
}
