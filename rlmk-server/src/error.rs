//! Mapping of service errors onto HTTP responses.
//!
//! Caller mistakes keep their message. Anything else is logged with its
//! cause and answered with a generic 500 body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use rlmk_core::constants::INTERNAL_ERROR_MESSAGE;
use rlmk_core::error::RlmkError;
use rlmk_models::api::ErrorBody;

/// Error returned by every handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] RlmkError),

    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Status code and client-facing message.
    pub fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(err) => match err {
                RlmkError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                RlmkError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                RlmkError::AuthFailed(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                RlmkError::Token(_) => (StatusCode::UNAUTHORIZED, "invalid or expired token".into()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.into()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self}");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type of route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
