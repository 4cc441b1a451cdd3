//! # Stripe Payment Intents
//!
//! Creates a PaymentIntent through `POST /v1/payment_intents` and hands back
//! the fields the client needs to confirm the payment in the browser.
//! One attempt per call; a Stripe rejection is relayed with its own status
//! and body.

use crate::config::StripeConfig;
use async_trait::async_trait;
use relay_core::{
    GatewayError, GatewayResult, PaymentIntent, PaymentIntentGateway, PaymentIntentParams,
};
use reqwest::{header::AUTHORIZATION, Client};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Stripe PaymentIntents client
pub struct StripePaymentIntents {
    config: StripeConfig,
    client: Client,
}

impl StripePaymentIntents {
    /// Create a client sharing an existing connection pool
    pub fn new(config: StripeConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Create a client with its own connection pool
    pub fn with_default_client(config: StripeConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::new(config, client))
    }

    fn form_params(params: &PaymentIntentParams) -> Vec<(&'static str, String)> {
        vec![
            ("amount", params.amount.to_string()),
            ("currency", params.currency.clone()),
            ("automatic_payment_methods", "true".to_string()),
        ]
    }
}

#[async_trait]
impl PaymentIntentGateway for StripePaymentIntents {
    #[instrument(
        skip(self, params),
        fields(plan_id = %params.subject.plan_id, amount = params.amount, currency = %params.currency)
    )]
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> GatewayResult<PaymentIntent> {
        let url = self.config.payment_intents_url();
        debug!("Creating Stripe payment intent: {}", url);

        let mut request = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.config.auth_header())
            .form(&Self::form_params(params));

        if let Some(ref version) = self.config.api_version {
            request = request.header("Stripe-Version", version);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        let data: Value = serde_json::from_str(&body)?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(GatewayError::Upstream {
                provider: self.provider_name().to_string(),
                status: status.as_u16(),
                body: data,
            });
        }

        let intent: PaymentIntent = serde_json::from_value(data)?;

        info!(
            "Created Stripe payment intent: id={}",
            intent.id.as_deref().unwrap_or("<missing>")
        );

        Ok(intent)
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{PaymentIntentRequest, DEFAULT_AMOUNT};
    use serde_json::json;
    use wiremock::matchers::{body_string, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(body: &str) -> PaymentIntentParams {
        let request = PaymentIntentRequest::from_slice(body.as_bytes()).unwrap();
        PaymentIntentParams::resolve(&request).unwrap()
    }

    fn client_for(server: &MockServer) -> StripePaymentIntents {
        let config = StripeConfig::new("sk_test_123").with_api_base_url(server.uri());
        StripePaymentIntents::with_default_client(config).unwrap()
    }

    #[test]
    fn test_form_params() {
        let form = StripePaymentIntents::form_params(&params(r#"{"plan_id":"p1","user_id":"u1"}"#));
        assert_eq!(form[0], ("amount", DEFAULT_AMOUNT.to_string()));
        assert_eq!(form[1], ("currency", "usd".to_string()));
        assert_eq!(form[2], ("automatic_payment_methods", "true".to_string()));
    }

    #[tokio::test]
    async fn test_creates_intent_with_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("amount=999&currency=usd&automatic_payment_methods=true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pi_1",
                "object": "payment_intent",
                "client_secret": "secret_1",
                "amount": 999,
                "currency": "usd",
                "status": "requires_payment_method"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let intent = client_for(&server)
            .create_payment_intent(&params(r#"{"plan_id":"p1","user_id":"u1"}"#))
            .await
            .unwrap();

        assert_eq!(intent.id.as_deref(), Some("pi_1"));
        assert_eq!(intent.client_secret.as_deref(), Some("secret_1"));
        assert_eq!(intent.amount, Some(999));
        assert_eq!(intent.currency.as_deref(), Some("usd"));
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_relayed() {
        let server = MockServer::start().await;
        let card_error = json!({
            "error": {
                "type": "card_error",
                "code": "card_declined",
                "message": "Your card was declined."
            }
        });
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(402).set_body_json(card_error.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_payment_intent(&params(r#"{"plan_id":"p1","user_id":"u1"}"#))
            .await
            .unwrap_err();

        match err {
            GatewayError::Upstream {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, "stripe");
                assert_eq!(status, 402);
                assert_eq!(body, card_error);
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_response_is_internal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_payment_intent(&params(r#"{"plan_id":"p1","user_id":"u1"}"#))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Internal(_)));
    }

    #[tokio::test]
    async fn test_api_version_header_sent_when_pinned() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_intents"))
            .and(header("stripe-version", "2024-12-18.acacia"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "pi_v" })))
            .expect(1)
            .mount(&server)
            .await;

        let config = StripeConfig::new("sk_test_123")
            .with_api_base_url(server.uri())
            .with_api_version(Some("2024-12-18.acacia".to_string()));
        let intents = StripePaymentIntents::with_default_client(config).unwrap();

        let intent = intents
            .create_payment_intent(&params(
                r#"{"plan_id":"p1","user_id":"u1","amount":1500,"currency":"eur"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(intent.id.as_deref(), Some("pi_v"));
        assert_eq!(intent.client_secret, None);
    }

    #[tokio::test]
    async fn test_network_failure_is_internal() {
        let config = StripeConfig::new("sk_test_123").with_api_base_url("http://127.0.0.1:1");
        let intents = StripePaymentIntents::with_default_client(config).unwrap();

        let err = intents
            .create_payment_intent(&params(r#"{"plan_id":"p1","user_id":"u1"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Internal(_)));
    }
}
