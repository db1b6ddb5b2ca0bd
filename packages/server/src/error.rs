use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::ScheduleError;
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;

use crate::embedding::EmbeddingError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `INVALID_SCHEDULE`,
    /// `NOT_FOUND`, `CONFLICT`, `EMBEDDING_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "INVALID_SCHEDULE")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Choose correct date: start_at must be strictly before expire_at")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// The event window is empty or reversed.
    InvalidSchedule(ScheduleError),
    NotFound(String),
    Conflict(String),
    /// The embedding service could not produce a vector.
    Embedding(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::InvalidSchedule(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "INVALID_SCHEDULE",
                    message: format!("Choose correct date: {err}"),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::Embedding(detail) => {
                tracing::warn!("Embedding service failure: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "EMBEDDING_UNAVAILABLE",
                        message: "Could not compute the description embedding".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Foreign-key violations mean a referenced row was removed (or a referencing
/// row added) by a concurrent request between our checks and the write.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!(%detail, "Foreign key violation caught on write");
                AppError::Conflict(
                    "A referenced record was changed by another request, retry".into(),
                )
            }
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::InvalidSchedule(err)
    }
}

impl From<EmbeddingError> for AppError {
    fn from(err: EmbeddingError) -> Self {
        AppError::Embedding(err.to_string())
    }
}
