use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schoolfeed_core::errors::{Error, ValidationError};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(Error::Validation(ValidationError::InvalidInput(
            rejection.body_text(),
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Core(Error::Validation(ValidationError::InvalidInput(
            rejection.body_text(),
        )))
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// HTTP status for a domain error code.
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::SchoolCreateTeacherOnly | Error::SchoolPermissionCheck(_) => StatusCode::FORBIDDEN,
        Error::AlreadyJoined { .. } | Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Database(_) | Error::EventPublish { .. } | Error::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Core(err) => {
                let status = status_for(&err);
                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("Request failed: {}", err);
                    "Internal server error".to_string()
                } else {
                    err.to_string()
                };
                (
                    status,
                    ErrorBody {
                        code: err.code(),
                        message,
                    },
                )
            }
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_SERVER_ERROR",
                        message: "Internal server error".to_string(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
