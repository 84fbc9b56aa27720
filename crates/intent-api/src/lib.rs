//! # intent-api
//!
//! HTTP API layer for the payment intent proxy.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The create-payment-intent endpoint
//! - Configuration and logging bootstrap
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | ANY | `/` | Create payment intent |
//! | ANY | `/createPaymentIntent` | Create payment intent |
//! | GET | `/health` | Health check |
//!
//! Request body `{ "amount": 1000, "currency": "usd" }`; success
//! `200 { "clientSecret": "pi_..._secret_..." }`, failure
//! `500 { "error": "..." }`.

pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::create_router;
pub use state::{AppConfig, AppState, ErrorExposure};
