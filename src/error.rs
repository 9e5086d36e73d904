//! Error types for the API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repo::RepoError;

// == API Error Enum ==
/// Unified error type for request handling.
///
/// Every variant carries the message that ends up in the JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or rejected request data
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credential
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("{0}")]
    Forbidden(String),

    /// Entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or state conflict
    #[error("{0}")]
    Conflict(String),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The single rejection used for every credential failure, so that a
    /// caller cannot distinguish a missing header from a bad signature.
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized. Invalid or missing token.".to_string())
    }

    /// Rejection for a role check failure.
    pub fn forbidden() -> Self {
        Self::Forbidden(
            "Access denied. You do not have permission to access this resource.".to_string(),
        )
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        Self::Internal(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers and services.
pub type Result<T> = std::result::Result<T, ApiError>;
