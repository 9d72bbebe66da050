use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error payload; shares the `result` key with the success payload.
#[derive(Debug, Serialize)]
struct ErrorBody {
    result: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. }
                | DomainError::UnknownUser
                | DomainError::UnknownParent(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::StoreUnavailable(_) => {
                    error!(error = %err, "store unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "store unavailable".to_string(),
                    )
                }
                DomainError::Unexpected(_) => {
                    error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorBody { result: msg })).into_response()
    }
}
