use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the auth service. Every handler failure is converted
/// to one of these at the operation boundary; nothing escapes as a panic.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    /// Unknown identifier and wrong pin both collapse into this variant so
    /// login responses cannot be used to probe which identifiers exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Identifier already registered")]
    DuplicateIdentifier,

    /// No well-formed `Authorization: Bearer <token>` header was present.
    #[error("Unauthorized: No token provided")]
    NoToken,

    /// A token was present but failed signature or expiry validation.
    #[error("Unauthorized: Invalid token")]
    InvalidToken,

    /// Store or crypto failure; details are logged, never sent to clients.
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            AuthError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid credentials" }),
            ),
            AuthError::DuplicateIdentifier => (
                StatusCode::CONFLICT,
                json!({ "message": "Identifier already registered" }),
            ),
            AuthError::NoToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Unauthorized: No token provided" }),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Unauthorized: Invalid token" }),
            ),
            AuthError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
