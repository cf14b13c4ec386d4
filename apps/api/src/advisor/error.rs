use thiserror::Error;

use crate::advisor::contract::ValidationFailure;
use crate::advisor::intent::Intent;
use crate::llm_client::LlmError;

/// Failure taxonomy of the advisor pipeline.
///
/// `MissingCredential` is fatal at startup. Everything else is per request and is
/// reported to the caller with its own error code.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("missing credential: environment variable '{var}' is not set")]
    MissingCredential { var: &'static str },

    #[error("upstream service error ({kind}): {0}", kind = .0.kind())]
    UpstreamServiceError(#[from] LlmError),

    #[error("malformed {intent} response: {detail}")]
    MalformedResponse { intent: Intent, detail: String },

    #[error("{intent} response failed validation: {failure}")]
    ValidationFailure {
        intent: Intent,
        failure: ValidationFailure,
    },
}

impl AdvisorError {
    /// Splits a validator failure into the malformed/invalid-shape halves of the taxonomy.
    pub fn from_validation(intent: Intent, failure: ValidationFailure) -> Self {
        match failure {
            ValidationFailure::Malformed(detail) => AdvisorError::MalformedResponse { intent, detail },
            failure => AdvisorError::ValidationFailure { intent, failure },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AdvisorError::MissingCredential { .. } => "missing_credential",
            AdvisorError::UpstreamServiceError(_) => "upstream_service_error",
            AdvisorError::MalformedResponse { .. } => "malformed_response",
            AdvisorError::ValidationFailure { .. } => "validation_failure",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AdvisorError::UpstreamServiceError(LlmError::Timeout))
    }
}
