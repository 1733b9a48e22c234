// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::auth::{generate_jwt, Claims};
use crate::database::AdminProfile;
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::ApiJson;
use crate::state::AppState;

/// Same message for unknown usernames and wrong passwords
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Checked against when the username is unknown so both rejections pay for a bcrypt verify
static UNKNOWN_ADMIN_HASH: OnceCell<String> = OnceCell::const_new();

async fn unknown_admin_hash(cost: u32) -> Result<&'static str, PasswordError> {
    UNKNOWN_ADMIN_HASH
        .get_or_try_init(|| hash_password("unknown-admin", cost))
        .await
        .map(String::as_str)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub admin: AdminProfile,
}

/// POST /api/auth/login - Authenticate an admin and receive a JWT
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// {
///   "message": "Login successful",
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "admin": { "id": 1, "username": "root", "email": "root@example.com" }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(username), Some(password)) = (required(payload.username), required(payload.password))
    else {
        return Err(ApiError::validation_error("Username and password are required"));
    };

    let Some(admin) = state.repos.admins.find_by_username(&username).await? else {
        let hash = unknown_admin_hash(state.config.security.bcrypt_cost).await?;
        verify_password(&password, hash).await?;
        tracing::warn!("Login rejected for unknown admin '{}'", username);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&password, &admin.password).await? {
        tracing::warn!("Login rejected for admin '{}': wrong password", username);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let claims = Claims::new(admin.id, admin.username.clone());
    let token = generate_jwt(&claims, &state.config.security.jwt_secret)?;

    tracing::info!("Admin '{}' logged in", admin.username);

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        admin: admin.into(),
    }))
}
