use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use diesel::{prelude::Queryable, Insertable};

use crate::models::band_models::BandInfo;
use crate::models::event_models::EventResponse;
use crate::models::profile_models::ProfileResponse;

#[derive(Queryable, Serialize, Clone, Debug)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub musician_profile_id: String,
    pub band_id: Option<String>,
    pub applied_by_type: String,
    pub quotation: Option<i32>,
    pub requirements: Option<String>,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub id: String,
    pub event_id: String,
    pub musician_profile_id: String,
    pub band_id: Option<String>,
    pub applied_by_type: String,
    pub quotation: Option<i32>,
    pub requirements: Option<String>,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateApplication {
    pub quotation: Option<i32>,
    pub requirements: Option<String>,
    /// Set when applying on behalf of a band the caller leads.
    pub band_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateApplicationStatus {
    pub status: String,
}

/// Application with musician, band and event views attached.
#[derive(Serialize, Debug)]
pub struct ApplicationResponse {
    pub id: String,
    pub event_id: String,
    pub musician_profile_id: String,
    pub band_id: Option<String>,
    pub applied_by_type: String,
    pub quotation: Option<i32>,
    pub requirements: Option<String>,
    pub status: String,
    pub musician_profile: ProfileResponse,
    pub band: Option<BandInfo>,
    pub event: EventResponse,
    pub created_at: Option<String>,
}
