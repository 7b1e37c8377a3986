use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::auth::{password::PasswordError, repo::StoreError};

/// Every failure a handler can return. Each variant renders as a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// 400 with an empty `{}` body.
    #[error("bad request")]
    EmptyBadRequest,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    /// 404 with an empty `{}` body.
    #[error("not found")]
    EmptyNotFound,
    #[error("{0}")]
    Conflict(String),
    /// A user could not be persisted; carries the store message and per-field details.
    #[error("could not create user: {response}")]
    CreateFailed {
        response: String,
        errors: Option<Value>,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::EmptyBadRequest | ApiError::CreateFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::EmptyNotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The registration failure envelope. Any store fault during registration lands here,
    /// with per-field details only for uniqueness violations.
    pub fn create_failed(e: &StoreError) -> Self {
        ApiError::CreateFailed {
            response: e.to_string(),
            errors: e.field_errors(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Backend(e) => ApiError::Internal(e),
            dup @ StoreError::Duplicate { .. } => ApiError::create_failed(&dup),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::EmptyBadRequest | ApiError::EmptyNotFound => json!({}),
            ApiError::CreateFailed { response, errors } => json!({
                "response": response,
                "success": false,
                "message": "Could not create user",
                "errors": errors,
            }),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                json!({ "message": "Internal server error" })
            }
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::Conflict(message) => json!({ "message": message }),
        };
        (status, Json(body)).into_response()
    }
}
