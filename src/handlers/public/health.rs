// handlers/public/health.rs - GET / handler

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - Report the database server's current time
///
/// ```json
/// { "serverTime": { "now": "2026-10-14T09:30:00.123456Z" } }
/// ```
pub async fn root(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.repos.health.server_time().await {
        Ok(now) => Ok(Json(json!({ "serverTime": { "now": now } }))),
        Err(e) => {
            tracing::error!("Error connecting to DB: {}", e);
            Err(ApiError::internal_server_error("Database connection failed"))
        }
    }
}
