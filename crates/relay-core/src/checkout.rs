//! # Checkout Links
//!
//! Builds the redirect URL for a hosted checkout page. The base URL comes from
//! deployment configuration; the plan, the user and the optional redirect
//! targets are set as query parameters. No upstream call is made.

use crate::error::{GatewayError, GatewayResult};
use crate::request::CheckoutRequest;
use serde::Serialize;
use url::Url;

/// Environment variable holding the hosted checkout base URL
pub const CHECKOUT_URL_VAR: &str = "PAYMENT_CHECKOUT_URL";

/// Successful checkout response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutResponse {
    /// Redirect the user here
    pub url: String,
}

/// Error returned when no checkout base URL is configured
pub fn checkout_not_configured() -> GatewayError {
    GatewayError::configuration_with_hint(
        format!("{} not configured", CHECKOUT_URL_VAR),
        format!(
            "Set the {} secret for this function or replace with your PSP integration.",
            CHECKOUT_URL_VAR
        ),
    )
}

/// Checkout link builder bound to an optional base URL.
///
/// `None` means the deployment has no checkout integration and every request
/// is answered with a configuration error.
#[derive(Debug, Clone, Default)]
pub struct CheckoutLinks {
    base_url: Option<String>,
}

impl CheckoutLinks {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Validate the request and produce the checkout redirect
    pub fn create(&self, request: &CheckoutRequest) -> GatewayResult<CheckoutResponse> {
        let subject = request.subject()?;
        let base = self.base_url.as_deref().ok_or_else(checkout_not_configured)?;

        let mut params = vec![
            ("plan_id", subject.plan_id.as_str()),
            ("user_id", subject.user_id.as_str()),
        ];
        if let Some(success_url) = request.success_url() {
            params.push(("success_url", success_url));
        }
        if let Some(cancel_url) = request.cancel_url() {
            params.push(("cancel_url", cancel_url));
        }

        let url = build_checkout_url(base, &params)?;
        Ok(CheckoutResponse { url })
    }
}

/// Parse `base` and set each parameter on its query string.
///
/// A parameter already on the base URL is overwritten in place and any
/// duplicates of it are dropped; unrelated parameters are kept.
pub fn build_checkout_url(base: &str, params: &[(&str, &str)]) -> GatewayResult<String> {
    let mut url = Url::parse(base)?;

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for (key, value) in params {
        set_pair(&mut pairs, key, value);
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url.to_string())
}

fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}
