use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::advisor::error::AdvisorError;
use crate::advisor::intent::ProfileError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, kind) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone(), None)
            }
            AppError::Advisor(e) => match e {
                AdvisorError::MissingCredential { .. } => {
                    tracing::error!("{e}");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "MISSING_CREDENTIAL",
                        "The advisor is not configured with a generative service credential"
                            .to_string(),
                        None,
                    )
                }
                AdvisorError::UpstreamServiceError(inner) => {
                    tracing::error!("Upstream error: {inner}");
                    let status = if e.is_timeout() {
                        StatusCode::GATEWAY_TIMEOUT
                    } else {
                        StatusCode::BAD_GATEWAY
                    };
                    (
                        status,
                        "UPSTREAM_SERVICE_ERROR",
                        "The generative service could not complete the request".to_string(),
                        Some(inner.kind()),
                    )
                }
                AdvisorError::MalformedResponse { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    e.to_string(),
                    None,
                ),
                AdvisorError::ValidationFailure { .. } => (
                    StatusCode::BAD_GATEWAY,
                    "VALIDATION_FAILURE",
                    e.to_string(),
                    None,
                ),
            },
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(kind) = kind {
            error["kind"] = json!(kind);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
