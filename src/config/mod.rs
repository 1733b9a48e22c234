use serde::{Deserialize, Serialize};
use sqlx::postgres::PgSslMode;
use std::env;
use thiserror::Error;

/// Default bcrypt work factor for admin password hashes
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt rejects work factors outside this range
pub const BCRYPT_COST_RANGE: (u32, u32) = (4, 31);

/// Default listen port when `PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not defined in environment variables")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    /// `None` leaves the sslmode of `DATABASE_URL` (or the driver default) in place
    pub ssl_mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
    /// Empty means any origin is allowed
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// `DATABASE_URL` is the only required variable; everything else falls back
    /// to the profile selected by `APP_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let config = match environment {
            Environment::Production => Self::production(database_url),
            Environment::Staging => Self::staging(database_url),
            Environment::Development => Self::development(database_url),
        }
        .with_env_overrides();

        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_SSL_MODE") {
            let v = v.trim().to_lowercase();
            self.database.ssl_mode = if v.is_empty() { None } else { Some(v) };
        }

        // API overrides
        if let Ok(v) = env::var("PORT") {
            self.api.port = v.trim().parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }

        self.security.bcrypt_cost = self
            .security
            .bcrypt_cost
            .clamp(BCRYPT_COST_RANGE.0, BCRYPT_COST_RANGE.1);

        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(mode) = &self.database.ssl_mode {
            parse_ssl_mode(mode)?;
        }
        Ok(())
    }

    fn base(database_url: String) -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
                ssl_mode: None,
            },
            api: ApiConfig {
                port: DEFAULT_PORT,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                bcrypt_cost: DEFAULT_BCRYPT_COST,
                enable_cors: true,
                cors_origins: Vec::new(),
            },
        }
    }

    pub(crate) fn development(database_url: String) -> Self {
        Self::base(database_url)
    }

    pub(crate) fn staging(database_url: String) -> Self {
        let mut config = Self::base(database_url);
        config.environment = Environment::Staging;
        config.database.max_connections = 20;
        config.database.connection_timeout = 10;
        config.database.ssl_mode = Some("require".to_string());
        config
    }

    pub(crate) fn production(database_url: String) -> Self {
        let mut config = Self::base(database_url);
        config.environment = Environment::Production;
        config.database.max_connections = 50;
        config.database.connection_timeout = 5;
        config.database.ssl_mode = Some("require".to_string());
        config.api.enable_request_logging = false;
        config
    }
}

impl DatabaseConfig {
    pub fn ssl_mode(&self) -> Result<Option<PgSslMode>, ConfigError> {
        self.ssl_mode.as_deref().map(parse_ssl_mode).transpose()
    }
}

impl SecurityConfig {
    pub fn has_jwt_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

fn parse_ssl_mode(value: &str) -> Result<PgSslMode, ConfigError> {
    match value {
        "disable" => Ok(PgSslMode::Disable),
        "allow" => Ok(PgSslMode::Allow),
        "prefer" => Ok(PgSslMode::Prefer),
        "require" => Ok(PgSslMode::Require),
        "verify-ca" => Ok(PgSslMode::VerifyCa),
        "verify-full" => Ok(PgSslMode::VerifyFull),
        other => Err(ConfigError::Invalid {
            name: "DATABASE_SSL_MODE",
            value: other.to_string(),
        }),
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
