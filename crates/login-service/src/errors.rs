use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The account lookup collaborator itself failed. Distinct from
    /// "no such account", which is a credential rejection.
    #[error("Directory error: {0}")]
    Directory(String),

    /// Writing the issued-token record failed. The login that triggered
    /// the write fails with it.
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error envelope returned to callers. Matches the success envelope's
/// shape with `status` forced to `false`.
#[derive(Serialize)]
struct ErrorBody {
    status: bool,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AuthError::InvalidToken(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            AuthError::Directory(_) | AuthError::Persistence(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal database error occurred".to_string(),
            ),
            AuthError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Service is misconfigured".to_string(),
            ),
        };

        let body = ErrorBody {
            status: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}
