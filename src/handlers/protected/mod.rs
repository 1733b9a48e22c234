// handlers/protected/mod.rs - endpoints behind middleware::auth
//
// Every handler here can rely on an `AuthAdmin` in the request extensions.
pub mod categories;
