use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::admins::PgAdminRepository;
use super::categories::PgCategoryRepository;
use super::models::{Admin, Category, CategoryFields, NewAdmin};
use super::pool::{DatabaseError, PgHealthProbe};

/// Credential store (`admins` table)
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Any admin holding either the username or the email
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Admin>, DatabaseError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError>;

    /// Fails with `DatabaseError::UniqueViolation` when username or email is taken
    async fn insert(&self, admin: NewAdmin) -> Result<Admin, DatabaseError>;
}

/// Category store (`categories` table)
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, ordered by name ascending
    async fn list(&self) -> Result<Vec<Category>, DatabaseError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DatabaseError>;

    /// Whether a row other than `excluding` already uses `name`
    async fn name_exists(&self, name: &str, excluding: Option<i32>) -> Result<bool, DatabaseError>;

    async fn insert(&self, fields: CategoryFields) -> Result<Category, DatabaseError>;

    /// `Ok(None)` when no row has `id`
    async fn update(&self, id: i32, fields: CategoryFields)
        -> Result<Option<Category>, DatabaseError>;
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Current time as reported by the database server
    async fn server_time(&self) -> Result<DateTime<Utc>, DatabaseError>;
}

/// Store handles shared by every request
#[derive(Clone)]
pub struct Repositories {
    pub admins: Arc<dyn AdminRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub health: Arc<dyn HealthProbe>,
}

impl Repositories {
    /// All stores backed by the same pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            admins: Arc::new(PgAdminRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            health: Arc::new(PgHealthProbe::new(pool)),
        }
    }
}
