use chrono::{Utc, Duration};
use jsonwebtoken::{encode, decode, Header, DecodingKey, EncodingKey, Validation};

use crate::models::token_models::Claims;

/// Session lifetime in hours (30 days), shared with the sessions table.
pub const SESSION_HOURS: i64 = 720;

pub fn generate_jwt(profile_id: &str, secret: &[u8]) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = Utc::now() + Duration::hours(SESSION_HOURS);
    let claims = Claims {
        sub: profile_id.to_owned(),
        exp: expiration.timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn verify_jwt(token: &str, secret: &[u8]) -> Option<Claims> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret), &Validation::default())
        .ok()
        .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_round_trips_with_matching_secret() {
        let token = generate_jwt("profile-1", b"secret").unwrap();
        let claims = verify_jwt(&token, b"secret").unwrap();
        assert_eq!(claims.sub, "profile-1");
    }

    #[test]
    fn jwt_fails_with_wrong_secret() {
        let token = generate_jwt("profile-1", b"secret").unwrap();
        assert!(verify_jwt(&token, b"other").is_none());
    }
}
