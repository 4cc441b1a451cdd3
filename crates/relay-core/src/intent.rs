//! # Payment Intents
//!
//! Types and the provider seam for server-side payment intent creation.
//!
//! ```text
//! PaymentIntentRequest ──resolve──▶ PaymentIntentParams
//!                                        │
//!                      PaymentIntentGateway::create_payment_intent
//!                                        │
//!                                        ▼
//!                      PaymentIntent ──▶ PaymentIntentResponse
//! ```

use crate::error::GatewayResult;
use crate::request::{PaymentIntentRequest, PlanSubject};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Amount charged when the request does not name one ($9.99)
pub const DEFAULT_AMOUNT: i64 = 999;

/// Currency used when the request does not name one
pub const DEFAULT_CURRENCY: &str = "usd";

/// Resolved parameters for one upstream payment intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentParams {
    pub subject: PlanSubject,
    /// Minor currency units
    pub amount: i64,
    pub currency: String,
}

impl PaymentIntentParams {
    /// Validate a request and fill in defaults.
    ///
    /// A zero amount and an empty currency count as not supplied.
    pub fn resolve(request: &PaymentIntentRequest) -> GatewayResult<Self> {
        let subject = request.subject()?;

        let amount = request
            .amount
            .filter(|amount| *amount != 0)
            .unwrap_or(DEFAULT_AMOUNT);

        let currency = request
            .currency
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        Ok(Self {
            subject,
            amount,
            currency,
        })
    }
}

/// Fields read back from the provider's payment intent object.
///
/// Anything the provider leaves out or sends as `null` stays `None` and is
/// omitted from the client response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentIntent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Successful payment intent response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentIntentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_intent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<PaymentIntent> for PaymentIntentResponse {
    fn from(intent: PaymentIntent) -> Self {
        Self {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
            amount: intent.amount,
            currency: intent.currency,
        }
    }
}

/// Provider able to create payment intents.
///
/// Implementations make exactly one upstream call per invocation and never
/// retry. A rejected call is reported as `GatewayError::Upstream` with the
/// provider's status and body.
#[async_trait]
pub trait PaymentIntentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> GatewayResult<PaymentIntent>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment intent gateway (dynamic dispatch)
pub type SharedPaymentIntentGateway = Arc<dyn PaymentIntentGateway>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;

    fn resolve(body: &str) -> GatewayResult<PaymentIntentParams> {
        let request = PaymentIntentRequest::from_slice(body.as_bytes()).unwrap();
        PaymentIntentParams::resolve(&request)
    }

    #[test]
    fn test_defaults_applied() {
        let params = resolve(r#"{"plan_id": "p1", "user_id": "u1"}"#).unwrap();
        assert_eq!(params.amount, 999);
        assert_eq!(params.currency, "usd");
    }

    #[test]
    fn test_zero_amount_and_empty_currency_use_defaults() {
        let params =
            resolve(r#"{"plan_id": "p1", "user_id": "u1", "amount": 0, "currency": ""}"#).unwrap();
        assert_eq!(params.amount, DEFAULT_AMOUNT);
        assert_eq!(params.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_explicit_values_kept() {
        let params =
            resolve(r#"{"plan_id": "p1", "user_id": "u1", "amount": 2500, "currency": "eur"}"#)
                .unwrap();
        assert_eq!(params.amount, 2500);
        assert_eq!(params.currency, "eur");
    }

    #[test]
    fn test_missing_subject_rejected() {
        let err = resolve(r#"{"amount": 100}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidInput(_)));
    }

    #[test]
    fn test_response_shape() {
        let intent = PaymentIntent {
            id: Some("pi_1".into()),
            client_secret: Some("secret_1".into()),
            amount: Some(999),
            currency: Some("usd".into()),
        };
        let body = serde_json::to_value(PaymentIntentResponse::from(intent)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "client_secret": "secret_1",
                "payment_intent_id": "pi_1",
                "amount": 999,
                "currency": "usd"
            })
        );
    }

    #[test]
    fn test_missing_upstream_fields_are_omitted() {
        let intent: PaymentIntent =
            serde_json::from_str(r#"{"id": "pi_2", "object": "payment_intent"}"#).unwrap();
        let body = serde_json::to_value(PaymentIntentResponse::from(intent)).unwrap();
        assert_eq!(body, serde_json::json!({ "payment_intent_id": "pi_2" }));
    }

    #[test]
    fn test_null_upstream_fields_are_omitted() {
        let intent: PaymentIntent =
            serde_json::from_str(r#"{"id": "pi_3", "client_secret": null, "amount": null}"#)
                .unwrap();
        let body = serde_json::to_value(PaymentIntentResponse::from(intent)).unwrap();
        assert_eq!(body, serde_json::json!({ "payment_intent_id": "pi_3" }));
    }

    struct FixedGateway;

    #[async_trait]
    impl PaymentIntentGateway for FixedGateway {
        async fn create_payment_intent(
            &self,
            params: &PaymentIntentParams,
        ) -> GatewayResult<PaymentIntent> {
            Ok(PaymentIntent {
                id: Some(format!("pi_{}", params.subject.plan_id)),
                client_secret: Some("secret".into()),
                amount: Some(params.amount),
                currency: Some(params.currency.clone()),
            })
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_gateway_behind_arc() {
        let gateway: SharedPaymentIntentGateway = Arc::new(FixedGateway);
        let params = resolve(r#"{"plan_id": "p1", "user_id": "u1"}"#).unwrap();
        let intent = gateway.create_payment_intent(&params).await.unwrap();
        assert_eq!(intent.id.as_deref(), Some("pi_p1"));
        assert_eq!(gateway.provider_name(), "fixed");
    }
}
