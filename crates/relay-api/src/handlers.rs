//! # Request Handlers
//!
//! Axum request handlers for the two payment functions.
//! Bodies are taken as raw bytes so that a malformed or unreadable body
//! surfaces as the function's own JSON 500 rather than the extractor's
//! plain-text rejection.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::IntoResponse,
    Json,
};
use relay_core::{
    CheckoutRequest, CheckoutResponse, GatewayError, PaymentIntentParams, PaymentIntentRequest,
    PaymentIntentResponse,
};
use relay_stripe::missing_secret_key;
use tracing::{debug, info, instrument};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Any method other than POST on a function route
pub async fn method_not_allowed() -> ApiError {
    GatewayError::MethodNotAllowed.into()
}

/// Buffer the request body, reporting oversize or broken bodies as 500s
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, ApiError> {
    let body = body.map_err(|rejection| GatewayError::Internal(rejection.body_text()))?;
    debug!(bytes = body.len(), "Read request body");
    Ok(body)
}

/// Return a hosted checkout URL for the chosen plan
#[instrument(skip_all)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let body = read_body(body)?;
    let request = CheckoutRequest::from_slice(&body)?;
    let response = state.checkout.create(&request)?;

    info!("Created checkout link: {}", response.url);

    Ok(Json(response))
}

/// Create a payment intent upstream and return its client secret
#[instrument(skip_all)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    let gateway = state
        .payment_intents
        .as_ref()
        .ok_or_else(missing_secret_key)?;

    let body = read_body(body)?;
    let request = PaymentIntentRequest::from_slice(&body)?;
    let params = PaymentIntentParams::resolve(&request)?;

    info!(
        "Creating payment intent: plan={}, user={}, amount={} {}",
        params.subject.plan_id, params.subject.user_id, params.amount, params.currency
    );

    let intent = gateway.create_payment_intent(&params).await?;

    Ok(Json(intent.into()))
}
