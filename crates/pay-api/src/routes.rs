//! # Routes
//!
//! Axum router configuration for the order API.

use crate::auth::require_auth;
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health          - Health check
/// - GET  /order/get-key   - Publishable Razorpay key (public)
/// - POST /order/create    - Create a Razorpay order (bearer auth)
/// - POST /order/verify    - Verify a checkout signature (bearer auth)
pub fn create_router(state: AppState) -> Router {
    // The frontend fetches the key and posts orders cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/order", order_routes(state.clone()))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}

fn order_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/create", post(handlers::create_order))
        .route("/verify", post(handlers::verify_payment))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/get-key", get(handlers::get_key))
        .merge(protected)
}
