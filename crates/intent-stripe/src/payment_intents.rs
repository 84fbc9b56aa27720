//! # Stripe Payment Intents
//!
//! Implementation of `POST /v1/payment_intents`.

use crate::config::StripeConfig;
use crate::form::encode_params;
use async_trait::async_trait;
use intent_core::{IntentProvider, PaymentIntent, PaymentIntentParams, ProxyError, ProxyResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe payment intent provider
///
/// Every call creates a new intent; no `Idempotency-Key` is sent.
pub struct StripeIntentProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeIntentProvider {
    /// Create a new Stripe provider
    pub fn new(config: StripeConfig) -> ProxyResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ProxyError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ProxyResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[async_trait]
impl IntentProvider for StripeIntentProvider {
    #[instrument(skip(self, params))]
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> ProxyResult<PaymentIntent> {
        let form_params = encode_params(params);
        let url = self.config.payment_intents_url();

        debug!(
            "Creating Stripe payment intent: {} form params",
            form_params.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| ProxyError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(provider_error(status.as_u16(), &body));
        }

        let intent: PaymentIntent = serde_json::from_str(&body).map_err(|e| {
            ProxyError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe payment intent: id={}, status={:?}",
            intent.id, intent.status
        );

        Ok(intent)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Map a non-success Stripe response to a provider error.
fn provider_error(status: u16, body: &str) -> ProxyError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(StripeErrorResponse {
            error:
                StripeError {
                    message: Some(message),
                    code,
                    ..
                },
        }) => ProxyError::Provider {
            provider: PROVIDER.to_string(),
            message,
            code,
            status: Some(status),
        },
        Ok(StripeErrorResponse { error }) => ProxyError::Provider {
            provider: PROVIDER.to_string(),
            message: format!(
                "HTTP {}: {}",
                status,
                error.error_type.as_deref().unwrap_or("unknown error")
            ),
            code: error.code,
            status: Some(status),
        },
        Err(_) => ProxyError::Provider {
            provider: PROVIDER.to_string(),
            message: format!("HTTP {}: {}", status, body),
            code: None,
            status: Some(status),
        },
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_uses_stripe_message() {
        let body = r#"{
            "error": {
                "code": "parameter_invalid_integer",
                "message": "This value must be greater than or equal to 1.",
                "param": "amount",
                "type": "invalid_request_error"
            }
        }"#;

        match provider_error(400, body) {
            ProxyError::Provider {
                message,
                code,
                status,
                ..
            } => {
                assert_eq!(message, "This value must be greater than or equal to 1.");
                assert_eq!(code.as_deref(), Some("parameter_invalid_integer"));
                assert_eq!(status, Some(400));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_provider_error_without_message() {
        let body = r#"{"error": {"type": "api_error"}}"#;
        let err = provider_error(500, body);
        assert_eq!(err.message(), "HTTP 500: api_error");
    }

    #[test]
    fn test_provider_error_non_json_body() {
        let err = provider_error(502, "Bad Gateway");
        assert_eq!(err.message(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_provider_name() {
        let provider = StripeIntentProvider::new(StripeConfig::new("sk_test_abc")).unwrap();
        assert_eq!(provider.provider_name(), "stripe");
        assert_eq!(provider.config().api_base_url, "https://api.stripe.com");
    }
}
