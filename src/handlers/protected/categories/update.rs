// handlers/protected/categories/update.rs - PUT /api/categories/:id handler

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::database::{Category, DatabaseError};
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiJson, AuthAdmin};
use crate::state::AppState;

use super::UpdateCategoryRequest;

const CATEGORY_NOT_FOUND: &str = "Category not found";
const DUPLICATE_NAME: &str = "Category name already exists";

/// PUT /api/categories/:id - Replace a category's name, count and image
pub async fn update(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    Path(raw_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let Some(name) = required(payload.name.clone()) else {
        return Err(ApiError::validation_error("Category name is required"));
    };

    let id: i32 = raw_id
        .parse()
        .map_err(|_| ApiError::validation_error("Invalid category id"))?;

    let categories = &state.repos.categories;

    let current = categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(CATEGORY_NOT_FOUND))?;

    if name != current.name && categories.name_exists(&name, Some(id)).await? {
        return Err(ApiError::conflict(DUPLICATE_NAME));
    }

    let fields = payload.into_fields(name, &current);

    let category = categories
        .update(id, fields)
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::conflict(DUPLICATE_NAME),
            other => {
                tracing::error!("Error updating category: {}", other);
                ApiError::internal()
            }
        })?
        // Row vanished between the lookup and the write
        .ok_or_else(|| ApiError::not_found(CATEGORY_NOT_FOUND))?;

    tracing::info!(
        "Category {} updated by {} (name '{}')",
        category.id,
        admin.username,
        category.name
    );

    Ok(Json(category))
}
