/// Every status an application can carry. Transition validity between these
/// values is not checked here; the write path is a single unconditional update.
pub const APPLICATION_STATUSES: [&str; 6] = [
    "pending",
    "accepted",
    "declined",
    "confirmed",
    "cancelled",
    "completed",
];

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CANCELLED: &str = "cancelled";

pub fn is_valid_application_status(status: &str) -> bool {
    APPLICATION_STATUSES.contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_are_accepted() {
        for s in APPLICATION_STATUSES {
            assert!(is_valid_application_status(s));
        }
    }

    #[test]
    fn unknown_statuses_are_rejected() {
        assert!(!is_valid_application_status("archived"));
        assert!(!is_valid_application_status(""));
        assert!(!is_valid_application_status("Pending"));
    }
}
