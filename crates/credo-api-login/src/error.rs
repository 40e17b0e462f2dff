//! Login-flow error types
//!
//! These are the *fatal* flow errors: they terminate the request with a
//! protocol-level error response and are never displayed inline on the
//! form. Recoverable credential failures travel as
//! [`AuthFailure`](crate::source::AuthFailure) instead and re-enter the
//! flow as state-carried errors.

use crate::state::StateError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credo_core::SourceId;
use serde::Serialize;
use thiserror::Error;

/// Result type for login-flow operations
pub type LoginResult<T> = Result<T, LoginError>;

/// Fatal login-flow errors
#[derive(Debug, Error)]
pub enum LoginError {
    /// Request arrived without the `AuthState` parameter
    #[error("Missing AuthState parameter")]
    MissingAuthState,

    /// `AuthState` parameter was present but not a valid state identifier
    #[error("Invalid AuthState parameter: {0}")]
    InvalidAuthState(String),

    /// State-store failure: unknown id, expiry, stage mismatch, storage
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// The source instance named in state is no longer configured.
    /// Indicates a configuration change mid-flow, not a credential problem.
    #[error("Unknown credential source: {0}")]
    UnknownSource(SourceId),

    /// The source exists but is the wrong variant for this flow
    #[error("Credential source {source_id} is not a {expected} source")]
    SourceKindMismatch {
        source_id: SourceId,
        expected: &'static str,
    },
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            LoginError::MissingAuthState | LoginError::InvalidAuthState(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            LoginError::State(e) => match e {
                StateError::NotFound(_) | StateError::Expired { .. } => {
                    (StatusCode::BAD_REQUEST, "unknown_state")
                }
                StateError::StageMismatch { .. } => (StatusCode::BAD_REQUEST, "stage_mismatch"),
                StateError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            },
            LoginError::UnknownSource(_) | LoginError::SourceKindMismatch { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "source_unavailable")
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
