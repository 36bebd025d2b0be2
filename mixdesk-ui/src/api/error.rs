//! Mapping from repository errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mixdesk_common::Error;
use serde_json::json;
use tracing::error;

/// Wrapper giving repository errors an HTTP shape:
/// NotFound -> 404, ConstraintViolation/InvalidInput -> 400, rest -> 500
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ConstraintViolation(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => {
                error!("internal error: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
