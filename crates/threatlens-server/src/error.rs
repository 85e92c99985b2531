//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use threatlens_core::ScanError;

/// JSON API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Scan failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Bad request.
    #[error("bad request: {0}")]
    BadRequest(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Scan(ScanError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::Scan(ScanError::Configuration(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "configuration_error")
            }
            ApiError::Scan(ScanError::Provider(_)) => (StatusCode::BAD_GATEWAY, "provider_error"),
            ApiError::Scan(ScanError::Network(_)) => (StatusCode::BAD_GATEWAY, "network_error"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_errors_map_to_statuses() {
        let cases = [
            (ScanError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ScanError::Configuration("c".into()), StatusCode::SERVICE_UNAVAILABLE),
            (ScanError::Provider("p".into()), StatusCode::BAD_GATEWAY),
            (ScanError::Network("n".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            let kind = err.kind();
            let (got_status, code) = ApiError::from(err).status_and_code();
            assert_eq!(got_status, status);
            assert_eq!(code, kind);
        }
    }

    #[test]
    fn scan_error_message_passes_through() {
        let err = ApiError::from(ScanError::Network(
            "Network Error: Could not connect to AbuseIPDB.".into(),
        ));
        assert_eq!(
            err.to_string(),
            "Network Error: Could not connect to AbuseIPDB."
        );
    }
}
