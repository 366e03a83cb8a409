use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use momentum_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// Structured error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric error code (1xxx-6xxx range)
    pub code: u16,

    pub message: String,

    pub severity: ErrorSeverity,

    /// Whether the request can be retried as is
    pub recoverable: bool,

    #[serde(skip)]
    error_code: Option<ErrorCode>,
}

impl ApiError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
            error_code: Some(error_code),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::Unauthorized, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InvalidInput, message)
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error_code {
            Some(code) => status_for(code),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidCredentials | ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,

        ErrorCode::UserNotFound
        | ErrorCode::HabitNotFound
        | ErrorCode::ProjectNotFound
        | ErrorCode::PhaseNotFound
        | ErrorCode::NotFound => StatusCode::NOT_FOUND,

        ErrorCode::Conflict => StatusCode::CONFLICT,

        ErrorCode::ValidationError | ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,

        ErrorCode::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

        ErrorCode::RepositoryError
        | ErrorCode::DatabaseConstraintViolation
        | ErrorCode::DataIntegrityError
        | ErrorCode::SerializationError
        | ErrorCode::InfrastructureError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_code(err.code(), err.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code, "Request failed: {}", self.message);
        } else {
            tracing::debug!(code = self.code, "Request rejected: {}", self.message);
        }
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
