#[derive(serde::Serialize, serde::Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // profile ID
    pub exp: i64,    // expiration timestamp
}
