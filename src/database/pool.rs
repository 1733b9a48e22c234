use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, DatabaseConfig};

use super::repository::HealthProbe;

/// Errors surfaced by the store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A UNIQUE constraint rejected the write; carries the constraint name
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return DatabaseError::UniqueViolation(constraint);
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Build the process-wide pool.
///
/// Connections are opened on first use, so an unreachable database shows up in
/// the health check rather than aborting startup.
pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let mut options = PgConnectOptions::from_str(&config.url)?;
    if let Some(mode) = config.ssl_mode()? {
        options = options.ssl_mode(mode);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect_lazy_with(options);

    info!(
        "Created database pool (max_connections={}, acquire_timeout={}s)",
        config.max_connections, config.connection_timeout
    );
    Ok(pool)
}

/// Health probe backed by `SELECT NOW()`
#[derive(Clone)]
pub struct PgHealthProbe {
    pool: PgPool,
}

impl PgHealthProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn server_time(&self) -> Result<DateTime<Utc>, DatabaseError> {
        let now: DateTime<Utc> = sqlx::query_scalar("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }
}
