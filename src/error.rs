use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::input::TEXT_FIELDS;
use crate::upstream::UpstreamError;

/// Failures of the question endpoint, each with its own status and body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no text provided")]
    MissingText { received_keys: Vec<String> },

    #[error("OPENROUTER_API_KEY is not configured on the server")]
    MissingApiKey,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingText { received_keys } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    received_keys: Some(received_keys),
                    ..ErrorResponse::new(format!(
                        "No text provided. Expected one of: {}",
                        TEXT_FIELDS.join(" | ")
                    ))
                },
            ),
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(ApiError::MissingApiKey.to_string()),
            ),
            ApiError::Upstream(UpstreamError::MalformedBody { status, raw }) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    status: Some(status.as_u16()),
                    raw_response: Some(raw),
                    ..ErrorResponse::new("The model response is not valid JSON")
                },
            ),
            ApiError::Upstream(UpstreamError::ErrorStatus { status, details }) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    status: Some(status.as_u16()),
                    details: Some(details),
                    ..ErrorResponse::new("The model provider returned an error")
                },
            ),
            ApiError::Upstream(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    details: Some(Value::String(err.to_string())),
                    ..ErrorResponse::new("Error generating the question")
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
