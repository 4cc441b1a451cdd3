//! # HTTP Error Boundary
//!
//! Converts every `GatewayError` into a JSON response so no failure leaves a
//! handler unanswered.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::GatewayError;
use tracing::{error, warn};

/// Handler error wrapper implementing `IntoResponse`
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::BAD_GATEWAY)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self.0 {
            GatewayError::MethodNotAllowed | GatewayError::InvalidInput(_) => {
                warn!(%status, error = %self.0, "Rejected request")
            }
            _ => error!(%status, error = %self.0, "Request failed"),
        }

        (status, Json(self.0.to_body())).into_response()
    }
}
