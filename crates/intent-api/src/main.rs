//! # Payment Intent Proxy
//!
//! Creates Stripe payment intents on behalf of client apps.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! payment-intent-proxy
//! ```

use intent_api::{routes, state::AppState, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    telemetry::init(telemetry::LogFormat::from_env());

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());
    info!(
        "Error exposure: {:?}, request validation: {}",
        state.config.error_exposure, state.config.validate_requests
    );

    let is_prod = state.config.is_production();

    // Create router
    let app = routes::create_router(state);

    info!("Payment intent proxy starting on http://{}", addr);

    if !is_prod {
        info!("Create intent: POST http://{}/createPaymentIntent", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
