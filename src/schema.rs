diesel::table! {
    band_members (band_id, profile_id) {
        #[max_length = 36]
        band_id -> Char,
        #[max_length = 36]
        profile_id -> Char,
        #[max_length = 20]
        role -> Varchar,
        joined_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    band_requests (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 36]
        band_id -> Char,
        #[max_length = 36]
        profile_id -> Char,
        #[max_length = 20]
        kind -> Varchar,
        #[max_length = 20]
        status -> Varchar,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    bands (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 100]
        name -> Varchar,
        description -> Nullable<Text>,
        #[max_length = 36]
        created_by -> Char,
        is_active -> Bool,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    bookings (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 36]
        event_id -> Char,
        #[max_length = 36]
        musician_profile_id -> Char,
        #[max_length = 36]
        band_id -> Nullable<Char>,
        #[max_length = 20]
        applied_by_type -> Varchar,
        quotation -> Nullable<Integer>,
        requirements -> Nullable<Text>,
        #[max_length = 20]
        status -> Varchar,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    events (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 200]
        title -> Varchar,
        description -> Nullable<Text>,
        #[max_length = 200]
        location -> Nullable<Varchar>,
        #[max_length = 50]
        event_type -> Nullable<Varchar>,
        genres -> Nullable<Text>,
        starts_at -> Timestamp,
        ends_at -> Nullable<Timestamp>,
        budget_min -> Nullable<Integer>,
        budget_max -> Nullable<Integer>,
        #[max_length = 100]
        contact_email -> Nullable<Varchar>,
        #[max_length = 30]
        contact_phone -> Nullable<Varchar>,
        #[max_length = 36]
        organizer_profile_id -> Char,
        #[max_length = 36]
        band_id -> Nullable<Char>,
        #[max_length = 20]
        posted_by_type -> Varchar,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    profiles (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 100]
        display_name -> Varchar,
        #[max_length = 20]
        role -> Varchar,
        bio -> Nullable<Text>,
        #[max_length = 200]
        location -> Nullable<Varchar>,
        avatar_url -> Nullable<Text>,
        password_hash -> Text,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    reviews (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 36]
        event_id -> Char,
        #[max_length = 36]
        reviewer_profile_id -> Char,
        #[max_length = 36]
        subject_profile_id -> Char,
        rating -> Integer,
        comment -> Nullable<Text>,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    sessions (id) {
        #[max_length = 36]
        id -> Char,
        #[max_length = 36]
        profile_id -> Char,
        #[max_length = 255]
        token -> Varchar,
        created_at -> Nullable<Timestamp>,
        expires_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(band_members -> bands (band_id));
diesel::joinable!(band_members -> profiles (profile_id));
diesel::joinable!(band_requests -> bands (band_id));
diesel::joinable!(band_requests -> profiles (profile_id));
diesel::joinable!(bookings -> events (event_id));
diesel::joinable!(bookings -> profiles (musician_profile_id));
diesel::joinable!(bookings -> bands (band_id));
diesel::joinable!(events -> profiles (organizer_profile_id));
diesel::joinable!(events -> bands (band_id));
diesel::joinable!(reviews -> events (event_id));
diesel::joinable!(sessions -> profiles (profile_id));

diesel::allow_tables_to_appear_in_same_query!(
    band_members,
    band_requests,
    bands,
    bookings,
    events,
    profiles,
    reviews,
    sessions,
);
