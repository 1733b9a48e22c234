// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer token checked by middleware::auth)
pub mod protected;
pub mod public;

/// Treat absent and empty strings alike for required text fields
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
