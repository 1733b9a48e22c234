use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Admin, NewAdmin};
use super::pool::DatabaseError;
use super::repository::AdminRepository;

pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        let query = r#"
            SELECT id, username, email, password
            FROM admins
            WHERE username = $1 OR email = $2
            LIMIT 1
        "#;

        let admin = sqlx::query_as::<_, Admin>(query)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, email, password FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn insert(&self, admin: NewAdmin) -> Result<Admin, DatabaseError> {
        let query = r#"
            INSERT INTO admins (username, password, email)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
        "#;

        let row = sqlx::query_as::<_, Admin>(query)
            .bind(&admin.username)
            .bind(&admin.password_hash)
            .bind(&admin.email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
