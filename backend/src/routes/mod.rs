//! Route definitions for the Vaultshop API
//!
//! Public routes live at the root; everything under `/api` passes through
//! the authentication gate first.

use crate::auth::auth_middleware;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod banks;
mod health;
mod products;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use banks::bank_routes;
pub use products::product_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .merge(auth_routes())
        .nest("/api", api_routes(state.clone()))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Protected routes; rejected requests never reach a handler
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(auth::current_user))
        .merge(product_routes())
        .merge(bank_routes())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
