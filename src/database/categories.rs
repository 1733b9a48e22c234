use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Category, CategoryFields};
use super::pool::DatabaseError;
use super::repository::CategoryRepository;

const COLUMNS: &str = "id, name, item_count, image_url";

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        let rows = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DatabaseError> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn name_exists(&self, name: &str, excluding: Option<i32>) -> Result<bool, DatabaseError> {
        // NULL excluding id matches every row
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 AND ($2::INTEGER IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, fields: CategoryFields) -> Result<Category, DatabaseError> {
        let query = format!(
            "INSERT INTO categories (name, item_count, image_url) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(&fields.name)
            .bind(fields.item_count)
            .bind(&fields.image_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        fields: CategoryFields,
    ) -> Result<Option<Category>, DatabaseError> {
        let query = format!(
            "UPDATE categories SET name = $1, item_count = $2, image_url = $3 WHERE id = $4 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Category>(&query)
            .bind(&fields.name)
            .bind(fields.item_count)
            .bind(&fields.image_url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
