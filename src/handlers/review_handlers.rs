use actix_web::{web, HttpResponse, Responder, ResponseError};
use actix_web::web::ReqData;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{get_conn, DbPool};
use crate::models::profile_models::Profile;
use crate::models::review_models::{CreateReview, NewReview, Review, ReviewResponse};
use crate::models::token_models::Claims;
use crate::schema::{profiles::dsl as profiles_dsl, reviews::dsl as reviews_dsl};
use crate::utils::validation_utils::{validate_rating, ValidationError};

pub async fn create_review(
    pool: web::Data<DbPool>,
    profile_id_param: web::Path<String>,
    payload: web::Json<CreateReview>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let data = payload.into_inner();
    if let Err(e) = validate_rating(data.rating) {
        return e.error_response();
    }

    let subject_id = profile_id_param.into_inner();
    if subject_id == claims.sub {
        return ValidationError("You cannot review yourself".to_string()).error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let subject_exists = profiles_dsl::profiles
        .filter(profiles_dsl::id.eq(&subject_id))
        .first::<Profile>(&mut conn)
        .optional();
    match subject_exists {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Profile not found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let new_review = NewReview {
        id: Uuid::new_v4().to_string(),
        event_id: data.event_id,
        reviewer_profile_id: claims.sub.clone(),
        subject_profile_id: subject_id,
        rating: data.rating,
        comment: data.comment,
        created_at: Some(Utc::now().naive_utc()),
    };

    match diesel::insert_into(reviews_dsl::reviews)
        .values(&new_review)
        .execute(&mut conn)
    {
        Ok(_) => HttpResponse::Created().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Reviews about a profile, with reviewer names attached by the usual
/// fetch-and-merge step.
pub async fn list_reviews(
    pool: web::Data<DbPool>,
    profile_id_param: web::Path<String>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let review_rows = match reviews_dsl::reviews
        .filter(reviews_dsl::subject_profile_id.eq(profile_id_param.into_inner()))
        .load::<Review>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut reviewer_ids: Vec<String> = review_rows
        .iter()
        .map(|r| r.reviewer_profile_id.clone())
        .collect();
    reviewer_ids.sort();
    reviewer_ids.dedup();

    let reviewers = if reviewer_ids.is_empty() {
        Vec::new()
    } else {
        match profiles_dsl::profiles
            .filter(profiles_dsl::id.eq_any(&reviewer_ids))
            .load::<Profile>(&mut conn)
        {
            Ok(rows) => rows,
            Err(_) => return HttpResponse::InternalServerError().finish(),
        }
    };

    let responses: Vec<ReviewResponse> = review_rows
        .into_iter()
        .map(|r| {
            let reviewer_name = reviewers
                .iter()
                .find(|p| p.id == r.reviewer_profile_id)
                .map(|p| p.display_name.clone())
                .unwrap_or_else(|| "Unknown Reviewer".to_string());
            ReviewResponse {
                id: r.id,
                event_id: r.event_id,
                reviewer_profile_id: r.reviewer_profile_id,
                reviewer_name,
                subject_profile_id: r.subject_profile_id,
                rating: r.rating,
                comment: r.comment,
                created_at: r.created_at.map(|dt| dt.to_string()),
            }
        })
        .collect();

    HttpResponse::Ok().json(responses)
}
