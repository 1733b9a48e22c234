use sqlx::PgPool;
use tracing::info;

use super::DatabaseError;

const CREATE_ADMINS: &str = r#"
    CREATE TABLE IF NOT EXISTS admins (
        id SERIAL PRIMARY KEY,
        username VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        password VARCHAR(255) NOT NULL,
        CONSTRAINT admins_username_key UNIQUE (username),
        CONSTRAINT admins_email_key UNIQUE (email)
    )
"#;

const CREATE_CATEGORIES: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        item_count INTEGER NOT NULL DEFAULT 0,
        image_url TEXT,
        CONSTRAINT categories_name_key UNIQUE (name)
    )
"#;

/// Create `admins` and `categories` when they are missing.
///
/// Existing tables are left untouched.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for ddl in [CREATE_ADMINS, CREATE_CATEGORIES] {
        sqlx::query(ddl).execute(pool).await?;
    }
    info!("Database schema ready (admins, categories)");
    Ok(())
}
