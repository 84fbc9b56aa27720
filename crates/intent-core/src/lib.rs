//! # intent-core
//!
//! Core types and traits for the payment intent proxy.
//!
//! This crate provides:
//! - `IntentProvider` trait for implementing payment processors
//! - `IntentRequest`, `PaymentIntentParams` and `PaymentIntent` for the create flow
//! - `ClientSecretResponse` and `ErrorBody` for the wire responses
//! - `ProxyError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use intent_core::{IntentRequest, IntentProvider, PaymentIntentParams};
//!
//! let request = IntentRequest::from_json_body(br#"{"amount": 1000, "currency": "usd"}"#);
//! let intent = provider.create_payment_intent(&PaymentIntentParams::card(request)).await?;
//!
//! // Hand intent.client_secret to the client-side payment UI
//! ```

pub mod error;
pub mod intent;
pub mod provider;

// Re-exports for convenience
pub use error::{ProxyError, ProxyResult};
pub use intent::{
    integral_number, ClientSecretResponse, ErrorBody, IntentRequest, PaymentIntent,
    PaymentIntentParams, CARD_PAYMENT_METHOD,
};
pub use provider::{BoxedIntentProvider, IntentProvider};
