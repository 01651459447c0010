use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::providers::ProviderError;

/// Failure kinds of `POST /api/analyze`. [`IntoResponse`] is the only place
/// they are turned into status codes and bodies.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// `apiKey` or `base64Data` missing or empty; no upstream call was made.
    #[error("Missing required fields")]
    MissingField,

    /// The upstream API answered with a non-2xx status.
    #[error("API Error: {status}")]
    Upstream { status: u16, body: String },

    /// Anything else: transport failure, timeout, unreadable body.
    #[error("{0}")]
    Unexpected(String),
}

impl From<ProviderError> for AnalyzeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, body } => AnalyzeError::Upstream { status, body },
            other => AnalyzeError::Unexpected(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AnalyzeError {
    fn from(_: validator::ValidationErrors) -> Self {
        AnalyzeError::MissingField
    }
}

impl From<JsonRejection> for AnalyzeError {
    fn from(rejection: JsonRejection) -> Self {
        AnalyzeError::Unexpected(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let error = self.to_string();

        let (status, details) = match self {
            AnalyzeError::MissingField => (StatusCode::BAD_REQUEST, None),
            AnalyzeError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                Some(body),
            ),
            AnalyzeError::Unexpected(message) => {
                tracing::error!(error = %message, "Analyze request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
