//! # relay-stripe
//!
//! Stripe provider for checkout-relay.
//!
//! **StripePaymentIntents** creates PaymentIntents with automatic payment
//! methods enabled and returns the client secret used by Stripe.js to finish
//! the payment in the browser.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_core::{PaymentIntentGateway, PaymentIntentParams};
//! use relay_stripe::{StripeConfig, StripePaymentIntents};
//!
//! let config = StripeConfig::new("sk_test_...");
//! let intents = StripePaymentIntents::with_default_client(config)?;
//!
//! let intent = intents.create_payment_intent(&params).await?;
//! // Send intent.client_secret to the browser
//! ```

pub mod config;
pub mod intents;

// Re-exports
pub use config::{missing_secret_key, StripeConfig, DEFAULT_API_BASE_URL, SECRET_KEY_VAR};
pub use intents::StripePaymentIntents;
