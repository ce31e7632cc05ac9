use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Request-local failures. Each kind maps to exactly one HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("E-mail already registered")]
    DuplicateEmail,
    #[error("Password exceeds the maximum of 72 bytes")]
    PasswordTooLong,
    #[error("Author with ID {0} not found")]
    AuthorNotFound(i64),
    #[error("Post with ID {0} not found")]
    PostNotFound(i64),
    #[error("The maximum allowed limit for posts is 100")]
    LimitExceeded,
    #[error("Invalid or expired token")]
    Unauthenticated,
    #[error("Access denied")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::DuplicateEmail
            | Self::PasswordTooLong
            | Self::LimitExceeded
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AuthorNotFound(_) | Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Concurrent writers racing a pre-check can still hit the unique index;
/// callers turn that into the matching domain error.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}
