use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use diesel::{prelude::Queryable, AsChangeset, Insertable, Selectable};

pub const PROFILE_ROLES: [&str; 2] = ["musician", "organizer"];

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::profiles)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfile {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateProfile {
    pub display_name: String,
    pub password: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(treat_none_as_null = false)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
}

/// Public view of a profile; never carries the password hash.
#[derive(Serialize, Clone, Debug)]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        ProfileResponse {
            id: p.id,
            display_name: p.display_name,
            role: p.role,
            bio: p.bio,
            location: p.location,
            avatar_url: p.avatar_url,
            created_at: p.created_at.map(|dt| dt.to_string()),
        }
    }
}

impl ProfileResponse {
    /// Placeholder used when an application references a profile that no
    /// longer resolves. Display wins over consistency here.
    pub fn unknown_musician(profile_id: &str) -> Self {
        ProfileResponse {
            id: profile_id.to_string(),
            display_name: "Unknown Musician".to_string(),
            role: "musician".to_string(),
            bio: None,
            location: None,
            avatar_url: None,
            created_at: None,
        }
    }
}
