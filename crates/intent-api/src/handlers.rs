//! # Request Handlers
//!
//! Axum request handlers for the payment intent proxy.

use crate::state::{AppConfig, AppState, ErrorExposure};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use intent_core::{ClientSecretResponse, ErrorBody, IntentRequest, PaymentIntentParams, ProxyError};
use tracing::{error, info, instrument, warn, Instrument, Span};
use uuid::Uuid;

type ErrorReply = (StatusCode, Json<ErrorBody>);

fn error_response(config: &AppConfig, err: ProxyError) -> ErrorReply {
    match &err {
        ProxyError::InvalidRequest(_) => warn!("Rejected payment intent request: {}", err),
        _ => error!("Failed to create payment intent: {}", err),
    }

    let message = match config.error_exposure {
        ErrorExposure::Passthrough => err.message().to_string(),
        ErrorExposure::Sanitized => err.sanitized_message().to_string(),
    };
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(ErrorBody::new(message)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "payment-intent-proxy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a card payment intent and relay its client secret.
///
/// Accepts any method. JSON and urlencoded bodies are read leniently:
/// whatever `amount` and `currency` they carry go to the provider as-is.
#[instrument(skip(state, headers, body), fields(request_id = %Uuid::new_v4()))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ClientSecretResponse>, ErrorReply> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let request = IntentRequest::from_body(content_type, &body);

    if state.config.validate_requests {
        request
            .validate()
            .map_err(|e| error_response(&state.config, e))?;
    }

    let params = PaymentIntentParams::card(request);
    let provider = state.provider.clone();

    // Runs detached so a client disconnect does not abort the create call.
    let outcome = tokio::spawn(
        async move { provider.create_payment_intent(&params).await }.instrument(Span::current()),
    )
    .await
    .map_err(|e| ProxyError::Internal(format!("payment intent task failed: {}", e)))
    .and_then(|result| result);

    let intent = outcome.map_err(|e| error_response(&state.config, e))?;

    info!("Created payment intent: {}", intent.id);

    Ok(Json(ClientSecretResponse::from(intent)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_passthrough_keeps_provider_text() {
        let config = AppConfig::default();
        let err = ProxyError::Provider {
            provider: "stripe".into(),
            message: "Invalid API Key provided: sk_test_****".into(),
            code: None,
            status: Some(401),
        };

        let (status, Json(body)) = error_response(&config, err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Invalid API Key provided: sk_test_****");
    }

    #[test]
    fn test_sanitized_hides_provider_text() {
        let config = AppConfig {
            error_exposure: ErrorExposure::Sanitized,
            ..AppConfig::default()
        };
        let err = ProxyError::Network("error sending request for url".into());

        let (status, Json(body)) = error_response(&config, err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "payment provider unreachable");
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a plain-text subscriber and return what it logged.
    fn captured_logs<F: FnOnce()>(f: F) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_validation_rejection_logged_as_warning() {
        let config = AppConfig::default();
        let logs = captured_logs(|| {
            let err = ProxyError::InvalidRequest("amount must be positive".into());
            let (status, _) = error_response(&config, err);
            assert_eq!(status, StatusCode::BAD_REQUEST);
        });

        assert!(logs.contains("WARN"));
        assert!(logs.contains("Rejected payment intent request"));
        assert!(!logs.contains("ERROR"));
    }

    #[test]
    fn test_provider_failure_logged_as_error() {
        let config = AppConfig::default();
        let logs = captured_logs(|| {
            error_response(&config, ProxyError::Network("connection reset".into()));
        });

        assert!(logs.contains("ERROR"));
        assert!(logs.contains("connection reset"));
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let config = AppConfig::default();
        let err = ProxyError::InvalidRequest("amount must be positive".into());

        let (status, _) = error_response(&config, err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
