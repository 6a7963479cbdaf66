use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use diesel::{prelude::Queryable, Insertable};

#[derive(Queryable, Clone, Debug)]
pub struct Review {
    pub id: String,
    pub event_id: String,
    pub reviewer_profile_id: String,
    pub subject_profile_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub id: String,
    pub event_id: String,
    pub reviewer_profile_id: String,
    pub subject_profile_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
pub struct CreateReview {
    pub event_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ReviewResponse {
    pub id: String,
    pub event_id: String,
    pub reviewer_profile_id: String,
    pub reviewer_name: String,
    pub subject_profile_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Option<String>,
}
