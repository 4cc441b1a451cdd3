//! # Stripe Configuration
//!
//! Configuration for the Stripe payment intents client.
//! The secret key only ever comes from the environment.

use relay_core::GatewayError;
use std::fmt;

/// Environment variable holding the Stripe secret key
pub const SECRET_KEY_VAR: &str = "STRIPE_SECRET_KEY";

/// Production Stripe API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Pinned API version; the account default applies when unset
    pub api_version: Option<String>,
}

impl StripeConfig {
    /// Create config with the default API host
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: None,
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_") || self.secret_key.starts_with("rk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_") || self.secret_key.starts_with("rk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Endpoint for payment intent creation
    pub fn payment_intents_url(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.api_base_url.trim_end_matches('/')
        )
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: pin the `Stripe-Version` header
    pub fn with_api_version(mut self, version: Option<String>) -> Self {
        self.api_version = version.filter(|v| !v.is_empty());
        self
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Error returned when no secret key is configured
pub fn missing_secret_key() -> GatewayError {
    GatewayError::configuration(format!("{} not set", SECRET_KEY_VAR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_modes() {
        let config = StripeConfig::new("sk_test_abc123");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = StripeConfig::new("sk_live_abc123");
        assert!(!config.is_test_mode());
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_missing_secret() {
        let err = missing_secret_key();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "STRIPE_SECRET_KEY not set");
        assert_eq!(err.to_body().get("hint"), None);
    }

    #[test]
    fn test_payment_intents_url_trims_slash() {
        let config = StripeConfig::new("sk_test_x").with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(
            config.payment_intents_url(),
            "http://127.0.0.1:9999/v1/payment_intents"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StripeConfig::new("sk_live_very_secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("very_secret"));
    }

    #[test]
    fn test_empty_api_version_ignored() {
        let config = StripeConfig::new("sk_test_x").with_api_version(Some(String::new()));
        assert_eq!(config.api_version, None);
    }
}
