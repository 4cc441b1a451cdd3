//! # Request Bodies
//!
//! JSON request shapes accepted by the two functions, plus the identifier
//! rules they share. A key that is absent, `null`, `""`, `0` or `false` is
//! treated as not supplied.
//!
//! Only a JSON object carries fields. Any other body except `null` decodes
//! as an empty request and fails validation with a 400.

use crate::error::{GatewayError, GatewayResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Plan or user identifier: a JSON string, number or boolean
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Identifier {
    /// Empty strings, zero and `false` carry no identity
    pub fn is_blank(&self) -> bool {
        match self {
            Identifier::Text(s) => s.is_empty(),
            Identifier::Number(n) => n.as_f64() == Some(0.0),
            Identifier::Flag(b) => !b,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Text(s) => f.write_str(s),
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Decode a body whose fields are only read from a JSON object
fn decode_fields<T: DeserializeOwned + Default>(body: &[u8]) -> GatewayResult<T> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Null => Err(GatewayError::Internal(
            "Request body is null; expected a JSON object".to_string(),
        )),
        fields @ Value::Object(_) => Ok(serde_json::from_value(fields)?),
        _ => Ok(T::default()),
    }
}

/// Who is buying which plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSubject {
    pub plan_id: String,
    pub user_id: String,
}

fn present(id: &Option<Identifier>) -> Option<String> {
    id.as_ref().filter(|id| !id.is_blank()).map(|id| id.to_string())
}

fn require_subject(
    plan_id: &Option<Identifier>,
    user_id: &Option<Identifier>,
    message: &str,
) -> GatewayResult<PlanSubject> {
    match (present(plan_id), present(user_id)) {
        (Some(plan_id), Some(user_id)) => Ok(PlanSubject { plan_id, user_id }),
        _ => Err(GatewayError::InvalidInput(message.to_string())),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Body of `create-checkout-session`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub plan_id: Option<Identifier>,
    #[serde(default)]
    pub user_id: Option<Identifier>,
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

impl CheckoutRequest {
    pub const MISSING_SUBJECT: &'static str = "plan_id and user_id are required";

    /// Decode a raw request body
    pub fn from_slice(body: &[u8]) -> GatewayResult<Self> {
        decode_fields(body)
    }

    pub fn subject(&self) -> GatewayResult<PlanSubject> {
        require_subject(&self.plan_id, &self.user_id, Self::MISSING_SUBJECT)
    }

    pub fn success_url(&self) -> Option<&str> {
        non_empty(&self.success_url)
    }

    pub fn cancel_url(&self) -> Option<&str> {
        non_empty(&self.cancel_url)
    }
}

/// Body of `create-payment-intent`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentIntentRequest {
    #[serde(default)]
    pub plan_id: Option<Identifier>,
    #[serde(default)]
    pub user_id: Option<Identifier>,
    /// Amount in minor currency units
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl PaymentIntentRequest {
    pub const MISSING_SUBJECT: &'static str = "plan_id and user_id required";

    /// Decode a raw request body
    pub fn from_slice(body: &[u8]) -> GatewayResult<Self> {
        decode_fields(body)
    }

    pub fn subject(&self) -> GatewayResult<PlanSubject> {
        require_subject(&self.plan_id, &self.user_id, Self::MISSING_SUBJECT)
    }
}
