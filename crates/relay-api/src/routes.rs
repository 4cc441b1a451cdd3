//! # Routes
//!
//! Axum router configuration for the payment functions.
//! Each function is served at the root and again under `/functions/v1`.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Function routes; any method other than POST answers 405
fn function_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session).fallback(handlers::method_not_allowed),
        )
        .route(
            "/create-payment-intent",
            post(handlers::create_payment_intent).fallback(handlers::method_not_allowed),
        )
}

/// Create the main application router
///
/// Routes:
///   - GET  /health
///   - POST /create-checkout-session
///   - POST /create-payment-intent
///   - POST /functions/v1/create-checkout-session
///   - POST /functions/v1/create-payment-intent
pub fn create_router(state: AppState) -> Router {
    // Called from browser checkout pages
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .merge(function_routes())
        .nest("/functions/v1", function_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
