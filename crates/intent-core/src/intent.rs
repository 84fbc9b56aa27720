//! # Payment Intent Types
//!
//! Inbound request, outbound create parameters, the provider's payment
//! intent, and the JSON bodies returned to the caller.

use crate::error::{ProxyError, ProxyResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The only payment method type requested on create.
pub const CARD_PAYMENT_METHOD: &str = "card";

/// Integer value of a JSON number, treating `1000.0` like `1000`.
///
/// JSON carries no integer/float distinction; a float with no fractional
/// part that fits in an `i64` is an integer.
pub fn integral_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Integer value of an amount field, from a number or a numeric string.
fn integral_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => integral_number(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Caller-supplied fields.
///
/// Both fields are kept as raw JSON so whatever the caller sent reaches
/// the provider unchanged. A JSON `null` reads the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
}

impl IntentRequest {
    pub fn new(amount: impl Into<Value>, currency: impl Into<Value>) -> Self {
        Self {
            amount: Some(amount.into()),
            currency: Some(currency.into()),
        }
    }

    /// Read a request from a raw HTTP body according to its content type.
    ///
    /// JSON (`application/json`, `*/*+json`) and urlencoded forms are
    /// parsed; any other or missing content type yields a request with no
    /// fields. Never fails.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if mime == "application/json" || mime.ends_with("+json") {
            Self::from_json_body(body)
        } else if mime == "application/x-www-form-urlencoded" {
            Self::from_form_body(body)
        } else {
            Self::default()
        }
    }

    /// Empty body, invalid JSON, or a non-object value all yield no fields.
    pub fn from_json_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut fields)) => Self {
                amount: fields.remove("amount").filter(|v| !v.is_null()),
                currency: fields.remove("currency").filter(|v| !v.is_null()),
            },
            _ => Self::default(),
        }
    }

    /// Form fields arrive as strings. The first occurrence of a key wins.
    pub fn from_form_body(body: &[u8]) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).unwrap_or_default();
        let field = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| Value::String(value.clone()))
        };

        Self {
            amount: field("amount"),
            currency: field("currency"),
        }
    }

    /// Strict checks: positive integer amount, three-letter currency code.
    pub fn validate(&self) -> ProxyResult<()> {
        match self.amount.as_ref().and_then(integral_amount) {
            Some(amount) if amount > 0 => {}
            _ => {
                return Err(ProxyError::InvalidRequest(
                    "amount must be a positive integer in the smallest currency unit".to_string(),
                ))
            }
        }

        match self.currency.as_ref().and_then(Value::as_str) {
            Some(code) if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Ok(())
            }
            _ => Err(ProxyError::InvalidRequest(
                "currency must be a three-letter ISO currency code".to_string(),
            )),
        }
    }
}

/// Parameters for the provider's create call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentIntentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    pub payment_method_types: Vec<String>,
}

impl PaymentIntentParams {
    /// Card-only parameters carrying the request fields as received.
    pub fn card(request: IntentRequest) -> Self {
        Self {
            amount: request.amount,
            currency: request.currency,
            payment_method_types: vec![CARD_PAYMENT_METHOD.to_string()],
        }
    }
}

/// A payment intent as created by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider id (pi_...)
    pub id: String,

    /// Secret handed to the client-side payment UI
    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    /// Provider status (e.g. `requires_payment_method`)
    #[serde(default)]
    pub status: Option<String>,

    /// Creation time, unix seconds
    #[serde(default)]
    pub created: Option<i64>,
}

impl PaymentIntent {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// Success body: `{ "clientSecret": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSecretResponse {
    #[serde(rename = "clientSecret", default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl From<PaymentIntent> for ClientSecretResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            client_secret: intent.client_secret,
        }
    }
}

/// Failure body: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
