//! # intent-stripe
//!
//! Stripe payment intent provider for the payment intent proxy.
//!
//! Creates card-only payment intents through Stripe's Payment Intents API
//! and returns the intent, whose `client_secret` the caller hands to
//! Stripe.js to complete the payment.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use intent_core::{IntentProvider, IntentRequest, PaymentIntentParams};
//! use intent_stripe::StripeIntentProvider;
//!
//! // Requires STRIPE_SECRET_KEY
//! let provider = StripeIntentProvider::from_env()?;
//!
//! let params = PaymentIntentParams::card(IntentRequest::new(1000, "usd"));
//! let intent = provider.create_payment_intent(&params).await?;
//! ```

pub mod config;
pub mod form;
pub mod payment_intents;

// Re-exports
pub use config::StripeConfig;
pub use payment_intents::StripeIntentProvider;
