//! # relay-core
//!
//! Core types and traits for the checkout-relay payment functions.
//!
//! This crate provides:
//! - `CheckoutRequest` and `PaymentIntentRequest` request bodies
//! - `CheckoutLinks` for hosted checkout redirect URLs
//! - `PaymentIntentGateway` trait for payment intent providers
//! - `GatewayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CheckoutLinks, CheckoutRequest};
//!
//! let links = CheckoutLinks::new(Some("https://pay.example/checkout".into()));
//! let request = CheckoutRequest::from_slice(br#"{"plan_id":"p1","user_id":"u1"}"#)?;
//!
//! // https://pay.example/checkout?plan_id=p1&user_id=u1
//! let response = links.create(&request)?;
//! ```

pub mod checkout;
pub mod error;
pub mod intent;
pub mod request;

// Re-exports for convenience
pub use checkout::{
    build_checkout_url, checkout_not_configured, CheckoutLinks, CheckoutResponse,
    CHECKOUT_URL_VAR,
};
pub use error::{GatewayError, GatewayResult};
pub use intent::{
    PaymentIntent, PaymentIntentGateway, PaymentIntentParams, PaymentIntentResponse,
    SharedPaymentIntentGateway, DEFAULT_AMOUNT, DEFAULT_CURRENCY,
};
pub use request::{CheckoutRequest, Identifier, PaymentIntentRequest, PlanSubject};
