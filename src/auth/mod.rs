use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

/// Lifetime of an issued admin token
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Token payload: admin identity plus expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(id: i32, username: impl Into<String>) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp();

        Self {
            id,
            username: username.into(),
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

/// Sign `claims` with the process-wide HS256 secret
pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &encoding_key).map_err(AuthError::Encode)
}

/// Verify signature and expiry, returning the embedded claims
pub fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
