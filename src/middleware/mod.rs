pub mod auth;
pub mod json;

pub use auth::{jwt_auth_middleware, AuthAdmin};
pub use json::ApiJson;
