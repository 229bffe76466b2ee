//! API errors and their mapping onto HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use records_data::RepositoryError;
use records_domain::ValidationError;
use tracing::error;

/// Errors a handler can surface to the client.
///
/// Mapping: validation and malformed requests are 400, missing students are
/// 404, everything else is an opaque 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input failed a field constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The targeted student does not exist.
    #[error("Student not found: {0}")]
    NotFound(i32),
    /// The request itself is malformed (e.g. a blank search term).
    #[error("{0}")]
    BadRequest(String),
    /// Storage or other unexpected failure. Details are logged, not leaked.
    #[error("Internal server error")]
    Internal,
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(e) => Self::Validation(e),
            RepositoryError::NotFound { id } => Self::NotFound(id),
            RepositoryError::Storage(source) => {
                error!(%source, "storage failure");
                Self::Internal
            }
        }
    }
}

impl ApiError {
    /// The status code this error renders as.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16()
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation(ValidationError::AgeOutOfRange).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadRequest("q is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: ApiError = RepositoryError::NotFound { id: 42 }.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Student not found: 42");

        let err: ApiError = RepositoryError::Validation(ValidationError::NameLength).into();
        assert_eq!(err.to_string(), "Name must be between 1 and 100 characters");
    }

    #[test]
    fn test_internal_error_is_opaque() {
        assert_eq!(ApiError::Internal.to_string(), "Internal server error");
    }
}
