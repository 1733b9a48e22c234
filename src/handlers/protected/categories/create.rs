// handlers/protected/categories/create.rs - POST /api/categories handler

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::database::{Category, DatabaseError};
use crate::error::ApiError;
use crate::handlers::required;
use crate::middleware::{ApiJson, AuthAdmin};
use crate::state::AppState;

use super::CreateCategoryRequest;

const DUPLICATE_CATEGORY: &str = "Category already exists";

/// POST /api/categories - Create a category
///
/// Input: `{ "name": "Books", "itemCount": 0, "imageUrl": "https://..." }`, only
/// `name` required. Returns 201 with the inserted row.
pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<AuthAdmin>,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let Some(name) = required(payload.name.clone()) else {
        return Err(ApiError::validation_error("Category name is required"));
    };

    let categories = &state.repos.categories;

    if categories.name_exists(&name, None).await? {
        return Err(ApiError::conflict(DUPLICATE_CATEGORY));
    }

    let category = categories
        .insert(payload.into_fields(name))
        .await
        .map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::conflict(DUPLICATE_CATEGORY),
            other => {
                tracing::error!("Error creating category: {}", other);
                ApiError::internal()
            }
        })?;

    tracing::info!(
        "Category '{}' (id {}) created by {}",
        category.name,
        category.id,
        admin.username
    );

    Ok((StatusCode::CREATED, Json(category)))
}
