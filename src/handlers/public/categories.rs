// handlers/public/categories.rs - GET /api/categories handler

use axum::{extract::State, Json};

use crate::database::Category;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/categories - All categories ordered by name
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.repos.categories.list().await.map_err(|e| {
        tracing::error!("Error fetching categories: {}", e);
        ApiError::internal()
    })?;
    Ok(Json(categories))
}
