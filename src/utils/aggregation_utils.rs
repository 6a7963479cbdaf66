//! Pure merge helpers for the aggregation endpoints. Rows are bulk-loaded by
//! the handlers; everything here stitches the small result sets together by
//! linear scan, with placeholder records for references that no longer
//! resolve.

use crate::models::band_models::{Band, BandInfo};
use crate::models::booking_models::{ApplicationResponse, Booking};
use crate::models::event_models::{Event, EventResponse, OrganizerInfo};
use crate::models::profile_models::{Profile, ProfileResponse};

/// Distinct organizer profile ids referenced by a set of events.
pub fn organizer_ids(events: &[Event]) -> Vec<String> {
    let mut ids: Vec<String> = events
        .iter()
        .map(|e| e.organizer_profile_id.clone())
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Distinct band ids referenced by a set of events. Empty when no event was
/// posted by a band, which lets callers skip the band lookup entirely.
pub fn event_band_ids(events: &[Event]) -> Vec<String> {
    let mut ids: Vec<String> = events.iter().filter_map(|e| e.band_id.clone()).collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Attach organizer and band views to each event. An id with no matching row
/// leaves the field absent; it never fails the aggregation.
pub fn enrich_events(
    events: Vec<Event>,
    organizers: &[Profile],
    bands: &[Band],
) -> Vec<EventResponse> {
    events
        .into_iter()
        .map(|event| {
            let organizer = organizers
                .iter()
                .find(|p| p.id == event.organizer_profile_id)
                .map(|p| OrganizerInfo {
                    id: p.id.clone(),
                    display_name: p.display_name.clone(),
                });
            let band = event.band_id.as_ref().and_then(|band_id| {
                bands
                    .iter()
                    .find(|b| &b.id == band_id)
                    .map(|b| BandInfo::from(b.clone()))
            });
            let mut response = EventResponse::from(event);
            response.organizer = organizer;
            response.band = band;
            response
        })
        .collect()
}

/// Union of directly-owned and band-led events, deduplicated by event id.
/// Order of first appearance is kept.
pub fn merge_event_sets(direct: Vec<Event>, band_led: Vec<Event>) -> Vec<Event> {
    let mut merged = direct;
    for event in band_led {
        if !merged.iter().any(|e| e.id == event.id) {
            merged.push(event);
        }
    }
    merged
}

/// Attach musician profile, band and event views to each booking. The event
/// comes from the already-loaded list, never re-fetched. Unresolved
/// references are replaced by placeholders so the aggregation always
/// produces a full row per booking.
pub fn enrich_applications(
    bookings: Vec<Booking>,
    musicians: &[Profile],
    bands: &[Band],
    events: &[Event],
) -> Vec<ApplicationResponse> {
    bookings
        .into_iter()
        .map(|booking| {
            let musician_profile = musicians
                .iter()
                .find(|p| p.id == booking.musician_profile_id)
                .map(|p| ProfileResponse::from(p.clone()))
                .unwrap_or_else(|| {
                    ProfileResponse::unknown_musician(&booking.musician_profile_id)
                });

            let band = booking.band_id.as_ref().and_then(|band_id| {
                bands
                    .iter()
                    .find(|b| &b.id == band_id)
                    .map(|b| BandInfo::from(b.clone()))
            });

            let event = events
                .iter()
                .find(|e| e.id == booking.event_id)
                .map(|e| EventResponse::from(e.clone()))
                .unwrap_or_else(|| EventResponse::unknown_event(&booking.event_id));

            ApplicationResponse {
                id: booking.id,
                event_id: booking.event_id,
                musician_profile_id: booking.musician_profile_id,
                band_id: booking.band_id,
                applied_by_type: booking.applied_by_type,
                quotation: booking.quotation,
                requirements: booking.requirements,
                status: booking.status,
                musician_profile,
                band,
                event,
                created_at: booking.created_at.map(|dt| dt.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn event(id: &str, organizer: &str, band: Option<&str>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("event {id}"),
            description: None,
            location: None,
            event_type: None,
            genres: None,
            starts_at: ts(1),
            ends_at: Some(ts(2)),
            budget_min: None,
            budget_max: None,
            contact_email: None,
            contact_phone: None,
            organizer_profile_id: organizer.to_string(),
            band_id: band.map(str::to_string),
            posted_by_type: if band.is_some() { "band" } else { "individual" }.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.to_string(),
            display_name: name.to_string(),
            role: "organizer".to_string(),
            bio: None,
            location: None,
            avatar_url: None,
            password_hash: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    fn band(id: &str, name: &str) -> Band {
        Band {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            created_by: "p1".to_string(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn booking(id: &str, event_id: &str, musician: &str, band: Option<&str>) -> Booking {
        Booking {
            id: id.to_string(),
            event_id: event_id.to_string(),
            musician_profile_id: musician.to_string(),
            band_id: band.map(str::to_string),
            applied_by_type: if band.is_some() { "band" } else { "individual" }.to_string(),
            quotation: Some(500),
            requirements: None,
            status: "pending".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn referenced_ids_are_distinct() {
        let events = vec![
            event("e1", "p1", Some("b1")),
            event("e2", "p1", None),
            event("e3", "p2", Some("b1")),
        ];
        assert_eq!(organizer_ids(&events), vec!["p1", "p2"]);
        assert_eq!(event_band_ids(&events), vec!["b1"]);
    }

    #[test]
    fn band_id_set_is_empty_without_band_events() {
        let events = vec![event("e1", "p1", None), event("e2", "p2", None)];
        assert!(event_band_ids(&events).is_empty());
    }

    #[test]
    fn enrich_attaches_matching_organizer_and_band() {
        let events = vec![event("e1", "p1", Some("b1"))];
        let out = enrich_events(events, &[profile("p1", "Ada")], &[band("b1", "The Testers")]);
        let organizer = out[0].organizer.as_ref().unwrap();
        assert_eq!(organizer.id, "p1");
        assert_eq!(organizer.display_name, "Ada");
        let attached = out[0].band.as_ref().unwrap();
        assert_eq!(attached.id, "b1");
        assert_eq!(attached.name, "The Testers");
    }

    #[test]
    fn enrich_leaves_fields_absent_on_unresolved_ids() {
        let events = vec![event("e1", "p-gone", Some("b-gone"))];
        let out = enrich_events(events, &[profile("p1", "Ada")], &[band("b1", "The Testers")]);
        assert!(out[0].organizer.is_none());
        assert!(out[0].band.is_none());
    }

    #[test]
    fn merged_event_sets_deduplicate_by_id() {
        let direct = vec![event("e1", "p1", None), event("e2", "p1", Some("b1"))];
        let band_led = vec![event("e2", "p1", Some("b1")), event("e3", "p2", Some("b1"))];
        let merged = merge_event_sets(direct, band_led);
        let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn applications_attach_musician_band_and_event() {
        let events = vec![event("e1", "p1", None)];
        let bookings = vec![booking("a1", "e1", "m1", Some("b1"))];
        let out = enrich_applications(
            bookings,
            &[profile("m1", "Miles")],
            &[band("b1", "The Testers")],
            &events,
        );
        assert_eq!(out[0].musician_profile.display_name, "Miles");
        assert_eq!(out[0].band.as_ref().unwrap().id, "b1");
        assert_eq!(out[0].event.id, "e1");
        assert_eq!(out[0].event.title, "event e1");
    }

    #[test]
    fn missing_musician_profile_becomes_placeholder() {
        let events = vec![event("e1", "p1", None)];
        let bookings = vec![booking("a1", "e1", "m-gone", None)];
        let out = enrich_applications(bookings, &[], &[], &events);
        assert_eq!(out[0].musician_profile.display_name, "Unknown Musician");
        assert_eq!(out[0].musician_profile.id, "m-gone");
        assert!(out[0].band.is_none());
    }

    #[test]
    fn missing_event_becomes_placeholder_with_invalid_date() {
        let bookings = vec![booking("a1", "e-gone", "m1", None)];
        let out = enrich_applications(bookings, &[profile("m1", "Miles")], &[], &[]);
        assert_eq!(out[0].event.title, "Unknown Event");
        assert_eq!(out[0].event.starts_at, "Invalid Date");
        assert_eq!(out[0].event.id, "e-gone");
    }
}
