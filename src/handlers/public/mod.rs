// handlers/public/mod.rs - endpoints reachable without a token
//
// Health check, token acquisition and the category listing consumed by the
// dashboard before login.
pub mod auth;
pub mod categories;
pub mod health;
