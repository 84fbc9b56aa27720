//! # Routes
//!
//! Axum router configuration for the payment intent proxy.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - `ANY /` and `ANY /createPaymentIntent` - create a payment intent
/// - `GET /health` - health check
pub fn create_router(state: AppState) -> Router {
    // Browser payment forms call the proxy directly
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", any(handlers::create_payment_intent))
        .route("/createPaymentIntent", any(handlers::create_payment_intent))
        .route("/health", get(handlers::health))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
