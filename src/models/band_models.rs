use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use diesel::{prelude::Queryable, Insertable};

pub const ROLE_LEADER: &str = "leader";
pub const ROLE_MEMBER: &str = "member";

pub const REQUEST_PENDING: &str = "pending";
pub const REQUEST_ACCEPTED: &str = "accepted";
pub const REQUEST_REJECTED: &str = "rejected";

pub const REQUEST_KIND_INVITE: &str = "invite";
pub const REQUEST_KIND_JOIN: &str = "join";

#[derive(Queryable, Clone, Debug)]
pub struct Band {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bands)]
pub struct NewBand {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateBand {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Queryable, Clone, Debug)]
pub struct BandMember {
    pub band_id: String,
    pub profile_id: String,
    pub role: String,
    pub joined_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::band_members)]
pub struct NewBandMember {
    pub band_id: String,
    pub profile_id: String,
    pub role: String,
    pub joined_at: Option<NaiveDateTime>,
}

#[derive(Queryable, Clone, Debug)]
pub struct BandRequest {
    pub id: String,
    pub band_id: String,
    pub profile_id: String,
    pub kind: String,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::band_requests)]
pub struct NewBandRequest {
    pub id: String,
    pub band_id: String,
    pub profile_id: String,
    pub kind: String,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateBandRequest {
    /// Target musician for invites; ignored for join requests.
    pub profile_id: Option<String>,
    pub kind: String,
}

#[derive(Deserialize)]
pub struct TransferLeadership {
    pub new_leader_profile_id: String,
}

/// Band with its derived member count.
#[derive(Serialize, Clone, Debug)]
pub struct BandResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub is_active: bool,
    pub member_count: i64,
    pub created_at: Option<String>,
}

impl BandResponse {
    pub fn from_band(b: Band, member_count: i64) -> Self {
        BandResponse {
            id: b.id,
            name: b.name,
            description: b.description,
            created_by: b.created_by,
            is_active: b.is_active,
            member_count,
            created_at: b.created_at.map(|dt| dt.to_string()),
        }
    }
}

/// Nested band view attached to events and applications during aggregation.
#[derive(Serialize, Clone, Debug)]
pub struct BandInfo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<Band> for BandInfo {
    fn from(b: Band) -> Self {
        BandInfo {
            id: b.id,
            name: b.name,
            description: b.description,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct MemberResponse {
    pub band_id: String,
    pub profile_id: String,
    pub role: String,
    pub display_name: String,
    pub joined_at: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct BandRequestResponse {
    pub id: String,
    pub band_id: String,
    pub profile_id: String,
    pub kind: String,
    pub status: String,
    pub created_at: Option<String>,
}

impl From<BandRequest> for BandRequestResponse {
    fn from(r: BandRequest) -> Self {
        BandRequestResponse {
            id: r.id,
            band_id: r.band_id,
            profile_id: r.profile_id,
            kind: r.kind,
            status: r.status,
            created_at: r.created_at.map(|dt| dt.to_string()),
        }
    }
}
