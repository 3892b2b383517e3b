use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::json_response;
use crate::core::ProjectionError;

/// Failures surfaced to API and CLI callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid number for {field}: {value:?}")]
    MalformedNumber { field: &'static str, value: String },

    #[error(transparent)]
    InvalidInput(#[from] ProjectionError),

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MalformedNumber { .. }
            | ApiError::InvalidInput(_)
            | ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request rejected");
        json_response(
            status,
            ErrorResponse {
                error: self.to_string(),
            },
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_errors_map_to_bad_request() {
        let err: ApiError = ProjectionError::InvalidInput {
            field: "duration",
            message: "must be >= 1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid duration: must be >= 1");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn malformed_number_message_quotes_raw_value() {
        let err = ApiError::MalformedNumber {
            field: "rate",
            value: "1,2,3".to_string(),
        };
        assert_eq!(err.to_string(), r#"Invalid number for rate: "1,2,3""#);
    }
}
