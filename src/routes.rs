use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub const AUTH_PREFIX: &str = "/api/auth";
pub const CATEGORIES_PREFIX: &str = "/api/categories";

/// Full application router with global middleware applied
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::health::root))
        .nest(AUTH_PREFIX, auth_routes())
        .merge(category_routes(state.clone()))
        .fallback(route_not_found)
        .with_state(state.clone());

    // Global middleware
    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn auth_routes() -> Router<AppState> {
    use crate::handlers::public::auth;

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

fn category_routes(state: AppState) -> Router<AppState> {
    use crate::handlers::protected::categories;

    let require_token = middleware::from_fn_with_state(state, jwt_auth_middleware);

    // Listing is public, mutations need a bearer token
    let collection = get(public::categories::list)
        .merge(post(categories::create).route_layer(require_token.clone()));

    Router::new()
        .route(CATEGORIES_PREFIX, collection.clone())
        .route(&format!("{CATEGORIES_PREFIX}/"), collection)
        .route(
            &format!("{CATEGORIES_PREFIX}/:id"),
            put(categories::update).route_layer(require_token),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
