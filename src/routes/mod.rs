use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::auth;
use crate::handlers;
use crate::AppState;

/// Contact-form routes, gated by the API-key guard.
pub fn mail_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/send", post(handlers::mail::send))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::api_key::api_key_guard,
        ))
}

/// Key-management routes, gated by the admin JWT guard.
pub fn api_keys_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api-keys",
            post(handlers::api_keys::create).get(handlers::api_keys::list),
        )
        .route("/api-keys/:id", delete(handlers::api_keys::revoke))
        .route_layer(middleware::from_fn_with_state(state, auth::jwt::admin_guard))
}

/// Public routes without any guard.
pub fn info_router() -> Router<AppState> {
    Router::new().route("/", get(handlers::info::api_info))
}
