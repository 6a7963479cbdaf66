use actix_web::{HttpResponse, ResponseError};
use chrono::NaiveDateTime;
use std::fmt;

/// Local validation failure; produced before any DB access.
#[derive(Debug, PartialEq)]
pub struct ValidationError(pub String);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for ValidationError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(serde_json::json!({ "error": self.0 }))
    }
}

/// Creation path: a start time requires an end time, and the end must be
/// strictly after the start.
pub fn validate_event_times_create(
    starts_at: NaiveDateTime,
    ends_at: Option<NaiveDateTime>,
) -> Result<(), ValidationError> {
    match ends_at {
        None => Err(ValidationError(
            "An end time is required when a start time is given".to_string(),
        )),
        Some(end) if end <= starts_at => Err(ValidationError(
            "Event end time must be after the start time".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

/// Update path: start and end must be supplied together; partial temporal
/// updates are rejected.
pub fn validate_event_times_update(
    starts_at: Option<NaiveDateTime>,
    ends_at: Option<NaiveDateTime>,
) -> Result<(), ValidationError> {
    match (starts_at, ends_at) {
        (None, None) => Ok(()),
        (Some(_), None) | (None, Some(_)) => Err(ValidationError(
            "Start and end times must be updated together".to_string(),
        )),
        (Some(start), Some(end)) if end <= start => Err(ValidationError(
            "Event end time must be after the start time".to_string(),
        )),
        (Some(_), Some(_)) => Ok(()),
    }
}

/// Leadership must move to a different member. A self-transfer would demote
/// the caller after the no-op promote and leave the band with no leader.
pub fn validate_leadership_transfer(
    current_leader_id: &str,
    new_leader_id: &str,
) -> Result<(), ValidationError> {
    if current_leader_id == new_leader_id {
        Err(ValidationError(
            "New leader must be a different band member".to_string(),
        ))
    } else {
        Ok(())
    }
}

pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError(
            "Rating must be between 1 and 5".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_rejects_missing_end_time() {
        assert!(validate_event_times_create(ts(1, 20), None).is_err());
    }

    #[test]
    fn create_rejects_end_before_start() {
        assert!(validate_event_times_create(ts(2, 20), Some(ts(2, 18))).is_err());
    }

    #[test]
    fn create_rejects_end_equal_to_start() {
        assert!(validate_event_times_create(ts(3, 20), Some(ts(3, 20))).is_err());
    }

    #[test]
    fn create_accepts_end_after_start() {
        assert!(validate_event_times_create(ts(4, 20), Some(ts(4, 23))).is_ok());
    }

    #[test]
    fn update_rejects_one_sided_temporal_change() {
        assert!(validate_event_times_update(Some(ts(5, 20)), None).is_err());
        assert!(validate_event_times_update(None, Some(ts(5, 23))).is_err());
    }

    #[test]
    fn update_accepts_no_temporal_change() {
        assert!(validate_event_times_update(None, None).is_ok());
    }

    #[test]
    fn update_enforces_strict_ordering_when_both_given() {
        assert!(validate_event_times_update(Some(ts(6, 20)), Some(ts(6, 19))).is_err());
        assert!(validate_event_times_update(Some(ts(6, 20)), Some(ts(6, 20))).is_err());
        assert!(validate_event_times_update(Some(ts(6, 20)), Some(ts(6, 22))).is_ok());
    }

    #[test]
    fn leadership_transfer_to_self_is_rejected() {
        assert!(validate_leadership_transfer("p1", "p1").is_err());
        assert!(validate_leadership_transfer("p1", "p2").is_ok());
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
