use actix_web::{web, HttpResponse, Responder, ResponseError};
use actix_web::web::ReqData;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::constants::status_constants::{
    is_valid_application_status, STATUS_CANCELLED, STATUS_PENDING,
};
use crate::db::{get_conn, DbConn, DbPool};
use crate::models::band_models::{Band, BandMember, ROLE_LEADER};
use crate::models::booking_models::{
    Booking, CreateApplication, NewBooking, UpdateApplicationStatus,
};
use crate::models::event_models::Event;
use crate::models::profile_models::Profile;
use crate::models::token_models::Claims;
use crate::schema::{
    band_members::dsl as bm_dsl, bands::dsl as bands_dsl, bookings::dsl as bk_dsl,
    events::dsl as events_dsl, profiles::dsl as profiles_dsl,
};
use crate::utils::aggregation_utils::enrich_applications;
use crate::utils::auth_utils::check_ownership;
use crate::utils::validation_utils::ValidationError;

use crate::handlers::event_handlers::load_profile_events;

/// Bulk-load the musician profiles and bands referenced by a set of bookings.
/// Missing rows are tolerated; the merge step substitutes placeholders.
fn load_booking_relations(
    conn: &mut DbConn,
    bookings: &[Booking],
) -> QueryResult<(Vec<Profile>, Vec<Band>)> {
    let mut musician_ids: Vec<String> = bookings
        .iter()
        .map(|b| b.musician_profile_id.clone())
        .collect();
    musician_ids.sort();
    musician_ids.dedup();

    let musicians = if musician_ids.is_empty() {
        Vec::new()
    } else {
        profiles_dsl::profiles
            .filter(profiles_dsl::id.eq_any(&musician_ids))
            .load::<Profile>(conn)?
    };

    let mut band_ids: Vec<String> = bookings.iter().filter_map(|b| b.band_id.clone()).collect();
    band_ids.sort();
    band_ids.dedup();

    let bands = if band_ids.is_empty() {
        Vec::new()
    } else {
        bands_dsl::bands
            .filter(bands_dsl::id.eq_any(&band_ids))
            .load::<Band>(conn)?
    };

    Ok((musicians, bands))
}

pub async fn create_application(
    pool: web::Data<DbPool>,
    event_id_param: web::Path<String>,
    payload: web::Json<CreateApplication>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let event_id_param = event_id_param.into_inner();
    let event_exists = events_dsl::events
        .filter(events_dsl::id.eq(&event_id_param))
        .first::<Event>(&mut conn)
        .optional();
    match event_exists {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Event not found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let data = payload.into_inner();
    let caller_id = claims.sub.clone();

    // Applying on a band's behalf requires the leader role in that band
    if let Some(applying_band_id) = &data.band_id {
        let membership = bm_dsl::band_members
            .filter(bm_dsl::band_id.eq(applying_band_id))
            .filter(bm_dsl::profile_id.eq(&caller_id))
            .filter(bm_dsl::role.eq(ROLE_LEADER))
            .first::<BandMember>(&mut conn)
            .optional();
        match membership {
            Ok(Some(_)) => {}
            Ok(None) => {
                return HttpResponse::Forbidden()
                    .body("Only the band leader can apply on behalf of the band")
            }
            Err(_) => return HttpResponse::InternalServerError().finish(),
        }
    }

    let now = Utc::now().naive_utc();
    let applied_by_type = if data.band_id.is_some() { "band" } else { "individual" };
    let new_booking = NewBooking {
        id: Uuid::new_v4().to_string(),
        event_id: event_id_param,
        musician_profile_id: caller_id,
        band_id: data.band_id,
        applied_by_type: applied_by_type.to_string(),
        quotation: data.quotation,
        requirements: data.requirements,
        status: STATUS_PENDING.to_string(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    let inserted = diesel::insert_into(bk_dsl::bookings)
        .values(&new_booking)
        .execute(&mut conn);

    match inserted {
        Ok(_) => {
            match bk_dsl::bookings
                .filter(bk_dsl::id.eq(&new_booking.id))
                .first::<Booking>(&mut conn)
            {
                Ok(created) => HttpResponse::Created().json(created),
                Err(_) => HttpResponse::Created().finish(),
            }
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Applications for every event the profile owns or leads, enriched with
/// musician, band and event views.
pub async fn list_profile_applications(
    pool: web::Data<DbPool>,
    profile_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let profile_id_param = profile_id_param.into_inner();
    let profile_id = match check_ownership(&profile_id_param, &claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let event_rows = match load_profile_events(&mut conn, profile_id) {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    if event_rows.is_empty() {
        return HttpResponse::Ok().json(Vec::<serde_json::Value>::new());
    }

    let event_ids: Vec<String> = event_rows.iter().map(|e| e.id.clone()).collect();
    let booking_rows = match bk_dsl::bookings
        .filter(bk_dsl::event_id.eq_any(&event_ids))
        .load::<Booking>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    match load_booking_relations(&mut conn, &booking_rows) {
        Ok((musicians, bands)) => HttpResponse::Ok().json(enrich_applications(
            booking_rows,
            &musicians,
            &bands,
            &event_rows,
        )),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Applications for one event, owner-only.
pub async fn list_event_applications(
    pool: web::Data<DbPool>,
    event_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let event_id_param = event_id_param.into_inner();
    let event = match events_dsl::events
        .filter(events_dsl::id.eq(&event_id_param))
        .first::<Event>(&mut conn)
        .optional()
    {
        Ok(Some(e)) => e,
        Ok(None) => return HttpResponse::NotFound().finish(),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    if event.organizer_profile_id != claims.sub {
        return HttpResponse::NotFound().body("Not Found");
    }

    let booking_rows = match bk_dsl::bookings
        .filter(bk_dsl::event_id.eq(&event_id_param))
        .load::<Booking>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let event_rows = vec![event];
    match load_booking_relations(&mut conn, &booking_rows) {
        Ok((musicians, bands)) => HttpResponse::Ok().json(enrich_applications(
            booking_rows,
            &musicians,
            &bands,
            &event_rows,
        )),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// The event's organizer settles an application; the applicant may only
/// withdraw their own by setting it to cancelled. Everyone else sees a 404.
fn may_update_status(
    booking: &Booking,
    organizer_profile_id: Option<&str>,
    caller_id: &str,
    new_status: &str,
) -> bool {
    if organizer_profile_id == Some(caller_id) {
        return true;
    }
    booking.musician_profile_id == caller_id && new_status == STATUS_CANCELLED
}

/// Status write with no transition validation; the transition graph is
/// deliberately left to the caller, only the vocabulary and the writer are
/// checked.
pub async fn update_application_status(
    pool: web::Data<DbPool>,
    application_id_param: web::Path<String>,
    payload: web::Json<UpdateApplicationStatus>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let data = payload.into_inner();
    if !is_valid_application_status(&data.status) {
        return ValidationError(format!("Unknown application status: {}", data.status))
            .error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let application_id_param = application_id_param.into_inner();
    let booking = match bk_dsl::bookings
        .filter(bk_dsl::id.eq(&application_id_param))
        .first::<Booking>(&mut conn)
        .optional()
    {
        Ok(Some(b)) => b,
        Ok(None) => return HttpResponse::NotFound().body("Application not found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let event = match events_dsl::events
        .filter(events_dsl::id.eq(&booking.event_id))
        .first::<Event>(&mut conn)
        .optional()
    {
        Ok(e) => e,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let organizer_id = event.as_ref().map(|e| e.organizer_profile_id.as_str());
    if !may_update_status(&booking, organizer_id, &claims.sub, &data.status) {
        return HttpResponse::NotFound().body("Not Found");
    }

    let updated = diesel::update(bk_dsl::bookings.filter(bk_dsl::id.eq(&application_id_param)))
        .set((
            bk_dsl::status.eq(&data.status),
            bk_dsl::updated_at.eq(Some(Utc::now().naive_utc())),
        ))
        .execute(&mut conn);

    match updated {
        Ok(0) => HttpResponse::NotFound().body("Application not found"),
        Ok(_) => {
            match bk_dsl::bookings
                .filter(bk_dsl::id.eq(&application_id_param))
                .first::<Booking>(&mut conn)
            {
                Ok(row) => HttpResponse::Ok().json(row),
                Err(_) => HttpResponse::Ok().finish(),
            }
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(musician: &str) -> Booking {
        Booking {
            id: "a1".to_string(),
            event_id: "e1".to_string(),
            musician_profile_id: musician.to_string(),
            band_id: None,
            applied_by_type: "individual".to_string(),
            quotation: None,
            requirements: None,
            status: STATUS_PENDING.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn organizer_may_set_any_status() {
        let b = booking("m1");
        assert!(may_update_status(&b, Some("org1"), "org1", "accepted"));
        assert!(may_update_status(&b, Some("org1"), "org1", "declined"));
        assert!(may_update_status(&b, Some("org1"), "org1", STATUS_CANCELLED));
    }

    #[test]
    fn applicant_may_only_cancel_their_own() {
        let b = booking("m1");
        assert!(may_update_status(&b, Some("org1"), "m1", STATUS_CANCELLED));
        assert!(!may_update_status(&b, Some("org1"), "m1", "accepted"));
        assert!(!may_update_status(&b, Some("org1"), "m1", "confirmed"));
    }

    #[test]
    fn unrelated_profiles_are_refused() {
        let b = booking("m1");
        assert!(!may_update_status(&b, Some("org1"), "stranger", "accepted"));
        assert!(!may_update_status(&b, Some("org1"), "stranger", STATUS_CANCELLED));
    }

    #[test]
    fn applicant_can_still_cancel_when_event_is_gone() {
        let b = booking("m1");
        assert!(may_update_status(&b, None, "m1", STATUS_CANCELLED));
        assert!(!may_update_status(&b, None, "m1", "accepted"));
    }
}
