//! # relay-api
//!
//! HTTP API layer for checkout-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout-link and payment-intent functions
//! - Layered configuration (`relay.toml`, `.env`, environment)
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-checkout-session` | Hosted checkout redirect URL |
//! | POST | `/create-payment-intent` | Stripe PaymentIntent client secret |
//!
//! Both functions are also served under `/functions/v1/`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
