use actix_web::{web, HttpResponse, Responder, ResponseError};
use actix_web::web::ReqData;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{get_conn, DbConn, DbPool};
use crate::models::band_models::{Band, ROLE_LEADER};
use crate::models::event_models::{
    join_genres, CreateEvent, Event, EventChanges, EventResponse, NewEvent, UpdateEvent,
};
use crate::models::pagination_models::Pagination;
use crate::models::profile_models::Profile;
use crate::models::token_models::Claims;
use crate::schema::{
    band_members::dsl as bm_dsl, bands::dsl as bands_dsl, bookings::dsl as bk_dsl,
    events::dsl as events_dsl, profiles::dsl as profiles_dsl,
};
use crate::utils::aggregation_utils::{
    enrich_events, event_band_ids, merge_event_sets, organizer_ids,
};
use crate::utils::auth_utils::check_ownership;
use crate::utils::pagination_utils::validate_pagination;
use crate::utils::validation_utils::{validate_event_times_create, validate_event_times_update};

/// Bulk-load the profiles and bands referenced by a set of events. The band
/// lookup is skipped entirely when no event was posted by a band.
fn load_event_relations(
    conn: &mut DbConn,
    events: &[Event],
) -> QueryResult<(Vec<Profile>, Vec<Band>)> {
    let profile_ids = organizer_ids(events);
    let organizers = if profile_ids.is_empty() {
        Vec::new()
    } else {
        profiles_dsl::profiles
            .filter(profiles_dsl::id.eq_any(&profile_ids))
            .load::<Profile>(conn)?
    };

    let band_ids = event_band_ids(events);
    let bands = if band_ids.is_empty() {
        Vec::new()
    } else {
        bands_dsl::bands
            .filter(bands_dsl::id.eq_any(&band_ids))
            .filter(bands_dsl::is_active.eq(true))
            .load::<Band>(conn)?
    };

    Ok((organizers, bands))
}

/// Events the profile owns directly, plus events posted by any band where
/// the profile holds the leader role, deduplicated by event id.
pub fn load_profile_events(conn: &mut DbConn, profile_id: &str) -> QueryResult<Vec<Event>> {
    let direct = events_dsl::events
        .filter(events_dsl::organizer_profile_id.eq(profile_id))
        .order(events_dsl::starts_at.asc())
        .load::<Event>(conn)?;

    let led_band_ids = bm_dsl::band_members
        .filter(bm_dsl::profile_id.eq(profile_id))
        .filter(bm_dsl::role.eq(ROLE_LEADER))
        .select(bm_dsl::band_id)
        .load::<String>(conn)?;

    let band_led = if led_band_ids.is_empty() {
        Vec::new()
    } else {
        events_dsl::events
            .filter(events_dsl::band_id.eq_any(&led_band_ids))
            .order(events_dsl::starts_at.asc())
            .load::<Event>(conn)?
    };

    Ok(merge_event_sets(direct, band_led))
}

/// Caller must hold the leader role of the given band.
fn is_band_leader(conn: &mut DbConn, band_id: &str, profile_id: &str) -> QueryResult<bool> {
    let membership = bm_dsl::band_members
        .filter(bm_dsl::band_id.eq(band_id))
        .filter(bm_dsl::profile_id.eq(profile_id))
        .filter(bm_dsl::role.eq(ROLE_LEADER))
        .first::<crate::models::band_models::BandMember>(conn)
        .optional()?;
    Ok(membership.is_some())
}

pub async fn list_events(
    pool: web::Data<DbPool>,
    query: web::Query<Pagination>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let (limit, offset) = match validate_pagination(&query.into_inner()) {
        Ok(v) => v,
        Err(e) => return e.error_response(),
    };

    let loaded = events_dsl::events
        .order(events_dsl::starts_at.asc())
        .limit(limit)
        .offset(offset)
        .load::<Event>(&mut conn);

    // A failed event query returns the error and no partial data
    let event_rows = match loaded {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    match load_event_relations(&mut conn, &event_rows) {
        Ok((organizers, bands)) => {
            HttpResponse::Ok().json(enrich_events(event_rows, &organizers, &bands))
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn get_event(
    pool: web::Data<DbPool>,
    event_id_param: web::Path<String>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let result = events_dsl::events
        .filter(events_dsl::id.eq(event_id_param.into_inner()))
        .first::<Event>(&mut conn)
        .optional();

    let event = match result {
        Ok(Some(e)) => e,
        Ok(None) => return HttpResponse::NotFound().finish(),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let rows = vec![event];
    match load_event_relations(&mut conn, &rows) {
        Ok((organizers, bands)) => {
            let mut enriched = enrich_events(rows, &organizers, &bands);
            match enriched.pop() {
                Some(e) => HttpResponse::Ok().json(e),
                None => HttpResponse::NotFound().finish(),
            }
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn list_profile_events(
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

    match load_event_relations(&mut conn, &event_rows) {
        Ok((organizers, bands)) => {
            HttpResponse::Ok().json(enrich_events(event_rows, &organizers, &bands))
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn create_event(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateEvent>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let data = payload.into_inner();

    // Temporal invariant checked before any DB work
    if let Err(e) = validate_event_times_create(data.starts_at, data.ends_at) {
        return e.error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let caller_id = claims.sub.clone();

    // Posting on behalf of a band requires the leader role
    if let Some(posting_band_id) = &data.band_id {
        match is_band_leader(&mut conn, posting_band_id, &caller_id) {
            Ok(true) => {}
            Ok(false) => {
                return HttpResponse::Forbidden()
                    .body("Only the band leader can post events for the band")
            }
            Err(_) => return HttpResponse::InternalServerError().finish(),
        }
    }

    let now = Utc::now().naive_utc();
    let posted_by_type = if data.band_id.is_some() { "band" } else { "individual" };
    let new_event = NewEvent {
        id: Uuid::new_v4().to_string(),
        title: data.title,
        description: data.description,
        location: data.location,
        event_type: data.event_type,
        genres: join_genres(data.genres.as_deref()),
        starts_at: data.starts_at,
        ends_at: data.ends_at,
        budget_min: data.budget_min,
        budget_max: data.budget_max,
        contact_email: data.contact_email,
        contact_phone: data.contact_phone,
        organizer_profile_id: caller_id,
        band_id: data.band_id,
        posted_by_type: posted_by_type.to_string(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    let inserted = diesel::insert_into(events_dsl::events)
        .values(&new_event)
        .execute(&mut conn);

    match inserted {
        Ok(_) => {
            match events_dsl::events
                .filter(events_dsl::id.eq(&new_event.id))
                .first::<Event>(&mut conn)
            {
                Ok(created) => HttpResponse::Created().json(EventResponse::from(created)),
                Err(_) => HttpResponse::Created().finish(),
            }
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn update_event(
    pool: web::Data<DbPool>,
    event_id_param: web::Path<String>,
    payload: web::Json<UpdateEvent>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let data = payload.into_inner();

    // Partial temporal updates rejected before any DB work
    if let Err(e) = validate_event_times_update(data.starts_at, data.ends_at) {
        return e.error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let event_id_param = event_id_param.into_inner();
    let existing = match events_dsl::events
        .filter(events_dsl::id.eq(&event_id_param))
        .first::<Event>(&mut conn)
        .optional()
    {
        Ok(Some(e)) => e,
        Ok(None) => return HttpResponse::NotFound().finish(),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    // Events are mutated only by their organizer
    if existing.organizer_profile_id != claims.sub {
        return HttpResponse::NotFound().body("Not Found");
    }

    let changes = EventChanges {
        title: data.title,
        description: data.description,
        location: data.location,
        event_type: data.event_type,
        genres: join_genres(data.genres.as_deref()),
        starts_at: data.starts_at,
        ends_at: data.ends_at,
        budget_min: data.budget_min,
        budget_max: data.budget_max,
        contact_email: data.contact_email,
        contact_phone: data.contact_phone,
        updated_at: Some(Utc::now().naive_utc()),
    };

    let updated = diesel::update(events_dsl::events.filter(events_dsl::id.eq(&event_id_param)))
        .set(&changes)
        .execute(&mut conn);

    match updated {
        Ok(_) => {
            match events_dsl::events
                .filter(events_dsl::id.eq(&event_id_param))
                .first::<Event>(&mut conn)
            {
                Ok(row) => HttpResponse::Ok().json(EventResponse::from(row)),
                Err(_) => HttpResponse::Ok().finish(),
            }
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn delete_event(
    pool: web::Data<DbPool>,
    event_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let event_id_param = event_id_param.into_inner();
    let existing = match events_dsl::events
        .filter(events_dsl::id.eq(&event_id_param))
        .first::<Event>(&mut conn)
        .optional()
    {
        Ok(Some(e)) => e,
        Ok(None) => return HttpResponse::NotFound().finish(),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    if existing.organizer_profile_id != claims.sub {
        return HttpResponse::NotFound().body("Not Found");
    }

    // Applications first, then the event row
    if diesel::delete(bk_dsl::bookings.filter(bk_dsl::event_id.eq(&event_id_param)))
        .execute(&mut conn)
        .is_err()
    {
        return HttpResponse::InternalServerError().finish();
    }

    let deleted = diesel::delete(events_dsl::events.filter(events_dsl::id.eq(&event_id_param)))
        .execute(&mut conn);

    match deleted {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}
