use actix_web::{web, HttpResponse, Responder, ResponseError};
use actix_web::web::ReqData;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{get_conn, DbConn, DbPool};
use crate::models::band_models::{
    Band, BandMember, BandRequest, BandRequestResponse, BandResponse, CreateBand,
    CreateBandRequest, MemberResponse, NewBand, NewBandMember, NewBandRequest,
    TransferLeadership, REQUEST_ACCEPTED, REQUEST_KIND_INVITE, REQUEST_KIND_JOIN,
    REQUEST_PENDING, REQUEST_REJECTED, ROLE_LEADER, ROLE_MEMBER,
};
use crate::models::token_models::Claims;
use crate::schema::{
    band_members::dsl as bm_dsl, band_requests::dsl as br_dsl, bands::dsl as bands_dsl,
    profiles::dsl as profiles_dsl,
};
use crate::utils::auth_utils::check_ownership;
use crate::utils::validation_utils::{validate_leadership_transfer, ValidationError};

fn member_count(conn: &mut DbConn, for_band_id: &str) -> QueryResult<i64> {
    bm_dsl::band_members
        .filter(bm_dsl::band_id.eq(for_band_id))
        .count()
        .get_result::<i64>(conn)
}

fn find_membership(
    conn: &mut DbConn,
    for_band_id: &str,
    for_profile_id: &str,
) -> QueryResult<Option<BandMember>> {
    bm_dsl::band_members
        .filter(bm_dsl::band_id.eq(for_band_id))
        .filter(bm_dsl::profile_id.eq(for_profile_id))
        .first::<BandMember>(conn)
        .optional()
}

fn is_leader(conn: &mut DbConn, for_band_id: &str, for_profile_id: &str) -> QueryResult<bool> {
    Ok(find_membership(conn, for_band_id, for_profile_id)?
        .map(|m| m.role == ROLE_LEADER)
        .unwrap_or(false))
}

/// Create a band with its creator as leader. Two sequential writes; if the
/// membership insert fails the band row is deleted again so no leaderless
/// band is left behind.
pub async fn create_band(
    pool: web::Data<DbPool>,
    payload: web::Json<CreateBand>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let data = payload.into_inner();
    if data.name.trim().is_empty() {
        return ValidationError("Band name is required".to_string()).error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let now = Utc::now().naive_utc();
    let new_band = NewBand {
        id: Uuid::new_v4().to_string(),
        name: data.name,
        description: data.description,
        created_by: claims.sub.clone(),
        is_active: true,
        created_at: Some(now),
        updated_at: Some(now),
    };

    if diesel::insert_into(bands_dsl::bands)
        .values(&new_band)
        .execute(&mut conn)
        .is_err()
    {
        return HttpResponse::InternalServerError().body("Failed to create band");
    }

    let leader_membership = NewBandMember {
        band_id: new_band.id.clone(),
        profile_id: claims.sub.clone(),
        role: ROLE_LEADER.to_string(),
        joined_at: Some(now),
    };

    if diesel::insert_into(bm_dsl::band_members)
        .values(&leader_membership)
        .execute(&mut conn)
        .is_err()
    {
        // Compensating delete; a band without a leader must not remain
        let _ = diesel::delete(bands_dsl::bands.filter(bands_dsl::id.eq(&new_band.id)))
            .execute(&mut conn);
        return HttpResponse::InternalServerError().body("Failed to create band");
    }

    match bands_dsl::bands
        .filter(bands_dsl::id.eq(&new_band.id))
        .first::<Band>(&mut conn)
    {
        Ok(created) => HttpResponse::Created().json(BandResponse::from_band(created, 1)),
        Err(_) => HttpResponse::Created().finish(),
    }
}

pub async fn list_bands(pool: web::Data<DbPool>) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_rows = match bands_dsl::bands
        .filter(bands_dsl::is_active.eq(true))
        .order(bands_dsl::name.asc())
        .load::<Band>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    // One count query per band
    let mut responses = Vec::with_capacity(band_rows.len());
    for band in band_rows {
        let count = match member_count(&mut conn, &band.id) {
            Ok(c) => c,
            Err(_) => return HttpResponse::InternalServerError().finish(),
        };
        responses.push(BandResponse::from_band(band, count));
    }
    HttpResponse::Ok().json(responses)
}

pub async fn get_band(
    pool: web::Data<DbPool>,
    band_id_param: web::Path<String>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_id_param = band_id_param.into_inner();
    let result = bands_dsl::bands
        .filter(bands_dsl::id.eq(&band_id_param))
        .filter(bands_dsl::is_active.eq(true))
        .first::<Band>(&mut conn)
        .optional();

    match result {
        Ok(Some(band)) => match member_count(&mut conn, &band.id) {
            Ok(count) => HttpResponse::Ok().json(BandResponse::from_band(band, count)),
            Err(_) => HttpResponse::InternalServerError().finish(),
        },
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn list_profile_bands(
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

    let member_band_ids = match bm_dsl::band_members
        .filter(bm_dsl::profile_id.eq(profile_id))
        .select(bm_dsl::band_id)
        .load::<String>(&mut conn)
    {
        Ok(ids) => ids,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    if member_band_ids.is_empty() {
        return HttpResponse::Ok().json(Vec::<BandResponse>::new());
    }

    let band_rows = match bands_dsl::bands
        .filter(bands_dsl::id.eq_any(&member_band_ids))
        .filter(bands_dsl::is_active.eq(true))
        .load::<Band>(&mut conn)
    {
        Ok(rows) => rows,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let mut responses = Vec::with_capacity(band_rows.len());
    for band in band_rows {
        let count = match member_count(&mut conn, &band.id) {
            Ok(c) => c,
            Err(_) => return HttpResponse::InternalServerError().finish(),
        };
        responses.push(BandResponse::from_band(band, count));
    }
    HttpResponse::Ok().json(responses)
}

pub async fn list_band_members(
    pool: web::Data<DbPool>,
    band_id_param: web::Path<String>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_id_param = band_id_param.into_inner();
    let result = bm_dsl::band_members
        .inner_join(profiles_dsl::profiles.on(bm_dsl::profile_id.eq(profiles_dsl::id)))
        .filter(bm_dsl::band_id.eq(&band_id_param))
        .select((
            bm_dsl::band_id,
            bm_dsl::profile_id,
            bm_dsl::role,
            profiles_dsl::display_name,
            bm_dsl::joined_at,
        ))
        .load::<(String, String, String, String, Option<chrono::NaiveDateTime>)>(&mut conn);

    match result {
        Ok(rows) => {
            let members: Vec<MemberResponse> = rows
                .into_iter()
                .map(|(b, p, member_role, name, joined)| MemberResponse {
                    band_id: b,
                    profile_id: p,
                    role: member_role,
                    display_name: name,
                    joined_at: joined.map(|dt| dt.to_string()),
                })
                .collect();
            HttpResponse::Ok().json(members)
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Invite (leader -> musician) or join (musician -> band) request.
pub async fn create_band_request(
    pool: web::Data<DbPool>,
    band_id_param: web::Path<String>,
    payload: web::Json<CreateBandRequest>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let data = payload.into_inner();
    if data.kind != REQUEST_KIND_INVITE && data.kind != REQUEST_KIND_JOIN {
        return ValidationError(format!("Unknown request kind: {}", data.kind)).error_response();
    }

    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_id_param = band_id_param.into_inner();
    let band_exists = bands_dsl::bands
        .filter(bands_dsl::id.eq(&band_id_param))
        .filter(bands_dsl::is_active.eq(true))
        .first::<Band>(&mut conn)
        .optional();
    match band_exists {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Band not found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let target_profile_id = if data.kind == REQUEST_KIND_INVITE {
        // Only the leader may invite, and an invite needs a target
        match is_leader(&mut conn, &band_id_param, &claims.sub) {
            Ok(true) => {}
            Ok(false) => {
                return HttpResponse::Forbidden().body("Only the band leader can send invites")
            }
            Err(_) => return HttpResponse::InternalServerError().finish(),
        }
        match data.profile_id {
            Some(target) => target,
            None => {
                return ValidationError("An invite requires a target profile".to_string())
                    .error_response()
            }
        }
    } else {
        claims.sub.clone()
    };

    match find_membership(&mut conn, &band_id_param, &target_profile_id) {
        Ok(Some(_)) => return HttpResponse::Conflict().body("Already a member of the band"),
        Ok(None) => {}
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let now = Utc::now().naive_utc();
    let new_request = NewBandRequest {
        id: Uuid::new_v4().to_string(),
        band_id: band_id_param,
        profile_id: target_profile_id,
        kind: data.kind,
        status: REQUEST_PENDING.to_string(),
        created_at: Some(now),
        updated_at: Some(now),
    };

    match diesel::insert_into(br_dsl::band_requests)
        .values(&new_request)
        .execute(&mut conn)
    {
        Ok(_) => {
            match br_dsl::band_requests
                .filter(br_dsl::id.eq(&new_request.id))
                .first::<BandRequest>(&mut conn)
            {
                Ok(created) => HttpResponse::Created().json(BandRequestResponse::from(created)),
                Err(_) => HttpResponse::Created().finish(),
            }
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

pub async fn list_band_requests(
    pool: web::Data<DbPool>,
    band_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_id_param = band_id_param.into_inner();
    match is_leader(&mut conn, &band_id_param, &claims.sub) {
        Ok(true) => {}
        Ok(false) => return HttpResponse::NotFound().body("Not Found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let result = br_dsl::band_requests
        .filter(br_dsl::band_id.eq(&band_id_param))
        .filter(br_dsl::status.eq(REQUEST_PENDING))
        .load::<BandRequest>(&mut conn);

    match result {
        Ok(rows) => {
            let requests: Vec<BandRequestResponse> =
                rows.into_iter().map(BandRequestResponse::from).collect();
            HttpResponse::Ok().json(requests)
        }
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Who may settle a pending request depends on its direction: the invited
/// musician settles an invite, the band leader settles a join request.
fn may_settle_request(
    conn: &mut DbConn,
    request: &BandRequest,
    caller_id: &str,
) -> QueryResult<bool> {
    if request.kind == REQUEST_KIND_INVITE {
        Ok(request.profile_id == caller_id)
    } else {
        is_leader(conn, &request.band_id, caller_id)
    }
}

/// Membership row to insert when settling an accepted request. A membership
/// gained between request creation and acceptance (e.g. via a parallel
/// invite) must not fail the settlement; the insert is skipped and the
/// request is still marked accepted.
fn membership_to_insert(
    request: &BandRequest,
    existing: Option<&BandMember>,
) -> Option<NewBandMember> {
    if existing.is_some() {
        return None;
    }
    Some(NewBandMember {
        band_id: request.band_id.clone(),
        profile_id: request.profile_id.clone(),
        role: ROLE_MEMBER.to_string(),
        joined_at: Some(Utc::now().naive_utc()),
    })
}

fn load_pending_request(
    conn: &mut DbConn,
    request_id: &str,
) -> Result<BandRequest, HttpResponse> {
    let result = br_dsl::band_requests
        .filter(br_dsl::id.eq(request_id))
        .first::<BandRequest>(conn)
        .optional();
    match result {
        Ok(Some(r)) if r.status == REQUEST_PENDING => Ok(r),
        Ok(Some(_)) => Err(HttpResponse::Conflict().body("Request already handled")),
        Ok(None) => Err(HttpResponse::NotFound().body("Request not found")),
        Err(_) => Err(HttpResponse::InternalServerError().finish()),
    }
}

/// Accepting inserts the membership first, then marks the request accepted.
/// Two separate writes, no transaction.
pub async fn accept_band_request(
    pool: web::Data<DbPool>,
    request_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let request_id_param = request_id_param.into_inner();
    let request = match load_pending_request(&mut conn, &request_id_param) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match may_settle_request(&mut conn, &request, &claims.sub) {
        Ok(true) => {}
        Ok(false) => return HttpResponse::NotFound().body("Not Found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let existing = match find_membership(&mut conn, &request.band_id, &request.profile_id) {
        Ok(m) => m,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    if let Some(membership) = membership_to_insert(&request, existing.as_ref()) {
        if diesel::insert_into(bm_dsl::band_members)
            .values(&membership)
            .execute(&mut conn)
            .is_err()
        {
            // Stop here; the request stays pending
            return HttpResponse::InternalServerError().body("Failed to add member");
        }
    }

    let updated = diesel::update(br_dsl::band_requests.filter(br_dsl::id.eq(&request_id_param)))
        .set((
            br_dsl::status.eq(REQUEST_ACCEPTED),
            br_dsl::updated_at.eq(Some(Utc::now().naive_utc())),
        ))
        .execute(&mut conn);

    match updated {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Rejecting only flips the status; no membership row is written.
pub async fn reject_band_request(
    pool: web::Data<DbPool>,
    request_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let request_id_param = request_id_param.into_inner();
    let request = match load_pending_request(&mut conn, &request_id_param) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match may_settle_request(&mut conn, &request, &claims.sub) {
        Ok(true) => {}
        Ok(false) => return HttpResponse::NotFound().body("Not Found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let updated = diesel::update(br_dsl::band_requests.filter(br_dsl::id.eq(&request_id_param)))
        .set((
            br_dsl::status.eq(REQUEST_REJECTED),
            br_dsl::updated_at.eq(Some(Utc::now().naive_utc())),
        ))
        .execute(&mut conn);

    match updated {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Leadership transfer: new leader promoted first, caller demoted second.
/// Two sequential role updates with no compensation in between.
pub async fn transfer_leadership(
    pool: web::Data<DbPool>,
    band_id_param: web::Path<String>,
    payload: web::Json<TransferLeadership>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_id_param = band_id_param.into_inner();
    let data = payload.into_inner();

    if let Err(e) = validate_leadership_transfer(&claims.sub, &data.new_leader_profile_id) {
        return e.error_response();
    }

    match is_leader(&mut conn, &band_id_param, &claims.sub) {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Forbidden()
                .body("Only the current leader can transfer leadership")
        }
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    match find_membership(&mut conn, &band_id_param, &data.new_leader_profile_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return ValidationError("New leader must be an existing band member".to_string())
                .error_response()
        }
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    let promoted = diesel::update(
        bm_dsl::band_members
            .filter(bm_dsl::band_id.eq(&band_id_param))
            .filter(bm_dsl::profile_id.eq(&data.new_leader_profile_id)),
    )
    .set(bm_dsl::role.eq(ROLE_LEADER))
    .execute(&mut conn);

    if promoted.is_err() {
        return HttpResponse::InternalServerError().finish();
    }

    let demoted = diesel::update(
        bm_dsl::band_members
            .filter(bm_dsl::band_id.eq(&band_id_param))
            .filter(bm_dsl::profile_id.eq(&claims.sub)),
    )
    .set(bm_dsl::role.eq(ROLE_MEMBER))
    .execute(&mut conn);

    match demoted {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Disband: members, then pending requests, then the band row, in that
/// order.
pub async fn disband_band(
    pool: web::Data<DbPool>,
    band_id_param: web::Path<String>,
    claims: ReqData<Claims>,
) -> impl Responder {
    let mut conn = match get_conn(&pool) {
        Ok(c) => c,
        Err(e) => return e.error_response(),
    };

    let band_id_param = band_id_param.into_inner();
    match is_leader(&mut conn, &band_id_param, &claims.sub) {
        Ok(true) => {}
        Ok(false) => return HttpResponse::NotFound().body("Not Found"),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    }

    if diesel::delete(bm_dsl::band_members.filter(bm_dsl::band_id.eq(&band_id_param)))
        .execute(&mut conn)
        .is_err()
    {
        return HttpResponse::InternalServerError().finish();
    }

    if diesel::delete(br_dsl::band_requests.filter(br_dsl::band_id.eq(&band_id_param)))
        .execute(&mut conn)
        .is_err()
    {
        return HttpResponse::InternalServerError().finish();
    }

    let deleted = diesel::delete(bands_dsl::bands.filter(bands_dsl::id.eq(&band_id_param)))
        .execute(&mut conn);

    match deleted {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_request(band: &str, profile: &str) -> BandRequest {
        BandRequest {
            id: "r1".to_string(),
            band_id: band.to_string(),
            profile_id: profile.to_string(),
            kind: REQUEST_KIND_JOIN.to_string(),
            status: REQUEST_PENDING.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn acceptance_inserts_member_role_for_new_member() {
        let request = pending_request("b1", "p1");
        let membership = membership_to_insert(&request, None).unwrap();
        assert_eq!(membership.band_id, "b1");
        assert_eq!(membership.profile_id, "p1");
        assert_eq!(membership.role, ROLE_MEMBER);
    }

    #[test]
    fn acceptance_skips_insert_when_already_a_member() {
        let request = pending_request("b1", "p1");
        let existing = BandMember {
            band_id: "b1".to_string(),
            profile_id: "p1".to_string(),
            role: ROLE_MEMBER.to_string(),
            joined_at: None,
        };
        assert!(membership_to_insert(&request, Some(&existing)).is_none());
    }
}
