use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use diesel::{prelude::Queryable, AsChangeset, Insertable};

use crate::models::band_models::BandInfo;

#[derive(Queryable, Clone, Debug)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub genres: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub organizer_profile_id: String,
    pub band_id: Option<String>,
    pub posted_by_type: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub genres: Option<String>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub organizer_profile_id: String,
    pub band_id: Option<String>,
    pub posted_by_type: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub genres: Option<Vec<String>>,
    pub starts_at: NaiveDateTime,
    pub ends_at: Option<NaiveDateTime>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub band_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub genres: Option<Vec<String>>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// Changeset for the events table; None fields are skipped.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = false)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub genres: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Nested organizer view attached during aggregation.
#[derive(Serialize, Clone, Debug)]
pub struct OrganizerInfo {
    pub id: String,
    pub display_name: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: Option<String>,
    pub genres: Vec<String>,
    pub starts_at: String,
    pub ends_at: Option<String>,
    pub budget_min: Option<i32>,
    pub budget_max: Option<i32>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub organizer_profile_id: String,
    pub band_id: Option<String>,
    pub posted_by_type: String,
    pub organizer: Option<OrganizerInfo>,
    pub band: Option<BandInfo>,
    pub created_at: Option<String>,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        EventResponse {
            id: e.id,
            title: e.title,
            description: e.description,
            location: e.location,
            event_type: e.event_type,
            genres: split_genres(e.genres.as_deref()),
            starts_at: e.starts_at.to_string(),
            ends_at: e.ends_at.map(|dt| dt.to_string()),
            budget_min: e.budget_min,
            budget_max: e.budget_max,
            contact_email: e.contact_email,
            contact_phone: e.contact_phone,
            organizer_profile_id: e.organizer_profile_id,
            band_id: e.band_id,
            posted_by_type: e.posted_by_type,
            organizer: None,
            band: None,
            created_at: e.created_at.map(|dt| dt.to_string()),
        }
    }
}

impl EventResponse {
    /// Placeholder for an application whose event no longer resolves.
    pub fn unknown_event(event_id: &str) -> Self {
        EventResponse {
            id: event_id.to_string(),
            title: "Unknown Event".to_string(),
            description: None,
            location: None,
            event_type: None,
            genres: Vec::new(),
            starts_at: "Invalid Date".to_string(),
            ends_at: None,
            budget_min: None,
            budget_max: None,
            contact_email: None,
            contact_phone: None,
            organizer_profile_id: String::new(),
            band_id: None,
            posted_by_type: "individual".to_string(),
            organizer: None,
            band: None,
            created_at: None,
        }
    }
}

/// Genre lists live in a single comma-joined text column.
pub fn join_genres(genres: Option<&[String]>) -> Option<String> {
    genres.map(|g| {
        g.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    })
}

pub fn split_genres(column: Option<&str>) -> Vec<String> {
    match column {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_round_trip_through_column_form() {
        let genres = vec!["jazz".to_string(), "funk".to_string(), "soul".to_string()];
        let column = join_genres(Some(&genres));
        assert_eq!(column.as_deref(), Some("jazz,funk,soul"));
        assert_eq!(split_genres(column.as_deref()), genres);
    }

    #[test]
    fn split_genres_handles_empty_and_padded_entries() {
        assert_eq!(split_genres(None), Vec::<String>::new());
        assert_eq!(split_genres(Some("")), Vec::<String>::new());
        assert_eq!(
            split_genres(Some(" rock , , indie ")),
            vec!["rock".to_string(), "indie".to_string()]
        );
    }

    #[test]
    fn unknown_event_carries_invalid_date_marker() {
        let placeholder = EventResponse::unknown_event("ev-404");
        assert_eq!(placeholder.id, "ev-404");
        assert_eq!(placeholder.title, "Unknown Event");
        assert_eq!(placeholder.starts_at, "Invalid Date");
    }
}
