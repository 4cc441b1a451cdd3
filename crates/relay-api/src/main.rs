//! # Checkout Relay
//!
//! Payment functions in front of Stripe: hosted checkout links and
//! PaymentIntent creation.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export PAYMENT_CHECKOUT_URL=https://pay.example/checkout
//!
//! # Run the server
//! checkout-relay
//! ```

use relay_api::{routes, AppConfig, AppState, LogFormat};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(|| fmt::layer()))
        .init();

    print_banner();

    match &config.source {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using environment only"),
    }

    match config.stripe_config() {
        Some(stripe) if stripe.is_live_mode() => info!("Stripe: live mode"),
        Some(stripe) if stripe.is_test_mode() => info!("Stripe: test mode"),
        Some(_) => warn!("Stripe: unrecognised secret key prefix"),
        None => warn!("STRIPE_SECRET_KEY not set; create-payment-intent will return 500"),
    }

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    // Initialize application state
    let state = AppState::new(config)?;

    info!("Environment: {}", state.config.environment);
    if let Some(provider) = state.payment_provider() {
        info!("Payment intent provider: {}", provider);
    }
    match state.checkout.base_url() {
        Some(base) => info!("Checkout base URL: {}", base),
        None => warn!("PAYMENT_CHECKOUT_URL not set; create-checkout-session will return 500"),
    }

    let app = routes::create_router(state);

    info!("Checkout relay starting on http://{}", addr);

    if !is_prod {
        info!("Checkout: POST http://{}/create-checkout-session", addr);
        info!("Payment intent: POST http://{}/create-payment-intent", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down HTTP server...");
}

fn print_banner() {
    println!(
        r#"
  Checkout Relay
  ━━━━━━━━━━━━━━━━━━━━━━━
  Stripe payment functions
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
