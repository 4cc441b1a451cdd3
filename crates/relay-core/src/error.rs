//! # Gateway Error Types
//!
//! Typed error handling for the checkout-relay functions.
//! Every handler returns `Result<T, GatewayError>`; the HTTP layer turns each
//! variant into a JSON response.

use serde_json::Value;
use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request used a method other than POST
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Required request fields missing or unusable
    #[error("{0}")]
    InvalidInput(String),

    /// Missing secret or URL in the deployment environment
    #[error("{message}")]
    Configuration {
        message: String,
        hint: Option<String>,
    },

    /// Upstream provider rejected the request; status and body are relayed as-is
    #[error("Upstream {provider} returned HTTP {status}")]
    Upstream {
        provider: String,
        status: u16,
        body: Value,
    },

    /// Catch-all: body parse failures, network failures, bad upstream JSON
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// Configuration error without a hint
    pub fn configuration(message: impl Into<String>) -> Self {
        GatewayError::Configuration {
            message: message.into(),
            hint: None,
        }
    }

    /// Configuration error carrying a human-readable hint
    pub fn configuration_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        GatewayError::Configuration {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MethodNotAllowed => 405,
            GatewayError::InvalidInput(_) => 400,
            GatewayError::Configuration { .. } => 500,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Internal(_) => 500,
        }
    }

    /// JSON body sent back to the caller.
    ///
    /// Upstream errors are passed through untouched; every other variant is
    /// rendered as `{"error": ...}` plus `hint` when one exists.
    pub fn to_body(&self) -> Value {
        match self {
            GatewayError::Upstream { body, .. } => body.clone(),
            GatewayError::Configuration {
                message,
                hint: Some(hint),
            } => serde_json::json!({ "error": message, "hint": hint }),
            other => serde_json::json!({ "error": other.to_string() }),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Internal(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::Internal(err.to_string())
    }
}

/// Result type alias for relay operations
pub type GatewayResult<T> = Result<T, GatewayError>;
