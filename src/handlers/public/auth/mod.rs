// handlers/public/auth/mod.rs - token acquisition endpoints
//
// POST /api/auth/signup creates an admin, POST /api/auth/login exchanges
// credentials for a 24h bearer token.

pub mod login;
pub mod signup;

pub use login::login;
pub use signup::signup;
