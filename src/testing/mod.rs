//! In-memory stores and request helpers for router-level tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{generate_jwt, password::hash_password, Claims, TOKEN_TTL_HOURS};
use crate::config::AppConfig;
use crate::database::{
    Admin, AdminRepository, Category, CategoryFields, CategoryRepository, DatabaseError,
    HealthProbe, NewAdmin, Repositories,
};
use crate::state::AppState;

pub const JWT_SECRET: &str = "test-secret";

/// Admins kept in a Vec; uniqueness mirrors the table constraints
#[derive(Default)]
pub struct MemoryAdmins {
    rows: Mutex<Vec<Admin>>,
}

#[async_trait]
impl AdminRepository for MemoryAdmins {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|a| a.username == username || a.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|a| a.username == username).cloned())
    }

    async fn insert(&self, admin: NewAdmin) -> Result<Admin, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.username == admin.username) {
            return Err(DatabaseError::UniqueViolation("admins_username_key".into()));
        }
        if rows.iter().any(|a| a.email == admin.email) {
            return Err(DatabaseError::UniqueViolation("admins_email_key".into()));
        }
        let row = Admin {
            id: rows.len() as i32 + 1,
            username: admin.username,
            email: admin.email,
            password: admin.password_hash,
        };
        rows.push(row.clone());
        Ok(row)
    }
}

#[derive(Default)]
pub struct MemoryCategories {
    rows: Mutex<Vec<Category>>,
}

#[async_trait]
impl CategoryRepository for MemoryCategories {
    async fn list(&self) -> Result<Vec<Category>, DatabaseError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DatabaseError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn name_exists(&self, name: &str, excluding: Option<i32>) -> Result<bool, DatabaseError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .any(|c| c.name == name && Some(c.id) != excluding))
    }

    async fn insert(&self, fields: CategoryFields) -> Result<Category, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.name == fields.name) {
            return Err(DatabaseError::UniqueViolation("categories_name_key".into()));
        }
        let row = Category {
            id: rows.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: fields.name,
            item_count: fields.item_count,
            image_url: fields.image_url,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        fields: CategoryFields,
    ) -> Result<Option<Category>, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.name == fields.name && c.id != id) {
            return Err(DatabaseError::UniqueViolation("categories_name_key".into()));
        }
        let Some(row) = rows.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        row.name = fields.name;
        row.item_count = fields.item_count;
        row.image_url = fields.image_url;
        Ok(Some(row.clone()))
    }
}

/// Admin store whose lookup never sees a duplicate, so inserts reach the
/// uniqueness check the way a concurrent signup would
#[derive(Default)]
pub struct RacyAdmins(MemoryAdmins);

#[async_trait]
impl AdminRepository for RacyAdmins {
    async fn find_by_username_or_email(
        &self,
        _username: &str,
        _email: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        Ok(None)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError> {
        self.0.find_by_username(username).await
    }

    async fn insert(&self, admin: NewAdmin) -> Result<Admin, DatabaseError> {
        self.0.insert(admin).await
    }
}

/// Category store whose `name_exists` always answers false
#[derive(Default)]
pub struct RacyCategories(MemoryCategories);

#[async_trait]
impl CategoryRepository for RacyCategories {
    async fn list(&self) -> Result<Vec<Category>, DatabaseError> {
        self.0.list().await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, DatabaseError> {
        self.0.find_by_id(id).await
    }

    async fn name_exists(&self, _name: &str, _excluding: Option<i32>) -> Result<bool, DatabaseError> {
        Ok(false)
    }

    async fn insert(&self, fields: CategoryFields) -> Result<Category, DatabaseError> {
        self.0.insert(fields).await
    }

    async fn update(
        &self,
        id: i32,
        fields: CategoryFields,
    ) -> Result<Option<Category>, DatabaseError> {
        self.0.update(id, fields).await
    }
}

/// Always answers 2026-01-01T00:00:00Z
pub struct FixedProbe;

#[async_trait]
impl HealthProbe for FixedProbe {
    async fn server_time(&self) -> Result<DateTime<Utc>, DatabaseError> {
        Ok(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
    }
}

pub struct FailingProbe;

#[async_trait]
impl HealthProbe for FailingProbe {
    async fn server_time(&self) -> Result<DateTime<Utc>, DatabaseError> {
        Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::development("postgres://test@localhost/test".into());
    config.security.jwt_secret = JWT_SECRET.into();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    config
}

pub fn state() -> AppState {
    let repos = Repositories {
        admins: Arc::new(MemoryAdmins::default()),
        categories: Arc::new(MemoryCategories::default()),
        health: Arc::new(FixedProbe),
    };
    AppState::new(config(), repos)
}

/// State whose stores skip the duplicate pre-checks
pub fn racy_state() -> AppState {
    let repos = Repositories {
        admins: Arc::new(RacyAdmins::default()),
        categories: Arc::new(RacyCategories::default()),
        health: Arc::new(FixedProbe),
    };
    AppState::new(config(), repos)
}

pub fn app(state: AppState) -> Router {
    crate::routes::app(state)
}

pub fn token(id: i32, username: &str) -> String {
    generate_jwt(&Claims::new(id, username), JWT_SECRET).unwrap()
}

pub fn expired_token(id: i32, username: &str) -> String {
    let issued = Utc::now() - Duration::hours(TOKEN_TTL_HOURS + 1);
    let claims = Claims {
        id,
        username: username.into(),
        iat: issued.timestamp(),
        exp: (issued + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    generate_jwt(&claims, JWT_SECRET).unwrap()
}

/// Insert an admin directly, returning its id
pub async fn seed_admin(state: &AppState, username: &str, email: &str, password: &str) -> i32 {
    let password_hash = hash_password(password, state.config.security.bcrypt_cost)
        .await
        .unwrap();
    state
        .repos
        .admins
        .insert(NewAdmin {
            username: username.into(),
            email: email.into(),
            password_hash,
        })
        .await
        .unwrap()
        .id
}

pub async fn seed_category(state: &AppState, name: &str) -> Category {
    seed_category_with(state, name, 0, None).await
}

pub async fn seed_category_with(
    state: &AppState,
    name: &str,
    item_count: i32,
    image_url: Option<&str>,
) -> Category {
    state
        .repos
        .categories
        .insert(CategoryFields {
            name: name.into(),
            item_count,
            image_url: image_url.map(str::to_string),
        })
        .await
        .unwrap()
}

fn request(method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, None, token)
}

pub fn post(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    request(Method::POST, uri, Some(body), token)
}

pub fn put(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    request(Method::PUT, uri, Some(body), token)
}

/// Drive one request through the router and decode the JSON reply
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
