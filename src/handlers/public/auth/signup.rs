// handlers/public/auth/signup.rs - POST /api/auth/signup handler

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::database::{AdminProfile, DatabaseError, NewAdmin};
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::ApiJson;
use crate::state::AppState;

const DUPLICATE_ADMIN: &str = "Username or email already exists";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub admin: AdminProfile,
}

/// POST /api/auth/signup - Register a new admin
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string", "email": "string" }
/// ```
///
/// Returns 201 with `{ message, admin: { id, username, email } }`.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let (Some(username), Some(password), Some(email)) = (
        required(payload.username),
        required(payload.password),
        required(payload.email),
    ) else {
        return Err(ApiError::validation_error("All fields are required"));
    };

    let admins = &state.repos.admins;

    if admins
        .find_by_username_or_email(&username, &email)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(DUPLICATE_ADMIN));
    }

    let password_hash = hash_password(&password, state.config.security.bcrypt_cost).await?;

    // The UNIQUE constraints catch a concurrent signup that passed the check above
    let admin = admins
        .insert(NewAdmin {
            username,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::conflict(DUPLICATE_ADMIN),
            other => other.into(),
        })?;

    tracing::info!("Admin created: {} (id {})", admin.username, admin.id);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Admin created successfully",
            admin: admin.into(),
        }),
    ))
}
