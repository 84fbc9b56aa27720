//! # Intent Provider Trait
//!
//! Seam between the HTTP layer and the payment processor. The Stripe
//! implementation lives in `intent-stripe`; tests substitute their own.

use crate::error::ProxyResult;
use crate::intent::{PaymentIntent, PaymentIntentParams};
use async_trait::async_trait;
use std::sync::Arc;

/// A payment processor able to create payment intents.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    /// Create a payment intent.
    ///
    /// One call creates one intent on the processor side; no
    /// deduplication key is sent.
    async fn create_payment_intent(&self, params: &PaymentIntentParams)
        -> ProxyResult<PaymentIntent>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedIntentProvider = Arc<dyn IntentProvider>;
