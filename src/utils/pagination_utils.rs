use crate::models::pagination_models::Pagination;
use crate::utils::validation_utils::ValidationError;

/// Validate pagination parameters
pub fn validate_pagination(p: &Pagination) -> Result<(i64, i64), ValidationError> {
    let limit = p.limit.unwrap_or(Pagination::DEFAULT_LIMIT);
    if limit <= 0 {
        return Err(ValidationError("Limit must be positive".to_string()));
    }
    if limit > Pagination::MAX_LIMIT {
        return Err(ValidationError(format!(
            "Limit too high: maximum allowed is {}",
            Pagination::MAX_LIMIT
        )));
    }
    let offset = p.offset.unwrap_or(0);
    if offset < 0 {
        return Err(ValidationError("Offset must not be negative".to_string()));
    }
    Ok((limit, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let p = Pagination { limit: None, offset: None };
        assert_eq!(validate_pagination(&p), Ok((Pagination::DEFAULT_LIMIT, 0)));
    }

    #[test]
    fn oversized_limit_is_rejected() {
        let p = Pagination { limit: Some(Pagination::MAX_LIMIT + 1), offset: None };
        assert!(validate_pagination(&p).is_err());
    }

    #[test]
    fn negative_values_are_rejected() {
        let p = Pagination { limit: Some(-1), offset: None };
        assert!(validate_pagination(&p).is_err());
        let p = Pagination { limit: None, offset: Some(-10) };
        assert!(validate_pagination(&p).is_err());
    }
}
