use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod clock;

pub use clock::{Clock, FixedClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(HabitId);
define_id!(ProjectId);
define_id!(PhaseId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1xxx)
    InvalidCredentials = 1001,
    Unauthorized = 1002,

    // Resource Not Found (2xxx)
    UserNotFound = 2001,
    HabitNotFound = 2002,
    ProjectNotFound = 2003,
    PhaseNotFound = 2004,
    NotFound = 2099,

    // Business Logic (3xxx)
    Conflict = 3001,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DatabaseConstraintViolation = 4002,
    DataIntegrityError = 4003,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    TimeoutError = 5003,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::InvalidCredentials | ErrorCode::Unauthorized | ErrorCode::Conflict => {
                ErrorSeverity::Warning
            }

            ErrorCode::UserNotFound
            | ErrorCode::HabitNotFound
            | ErrorCode::ProjectNotFound
            | ErrorCode::PhaseNotFound
            | ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::DataIntegrityError
            | ErrorCode::DatabaseConstraintViolation
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            _ => ErrorSeverity::Warning,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::TimeoutError | ErrorCode::RepositoryError | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Phase not found: {0}")]
    PhaseNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InvalidCredentials(_) => ErrorCode::InvalidCredentials,
            DomainError::Unauthorized(_) => ErrorCode::Unauthorized,
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::HabitNotFound(_) => ErrorCode::HabitNotFound,
            DomainError::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            DomainError::PhaseNotFound(_) => ErrorCode::PhaseNotFound,
            DomainError::Conflict(_) => ErrorCode::Conflict,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::ConstraintViolation(_) => ErrorCode::DatabaseConstraintViolation,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
            DomainError::NotFound(_) => ErrorCode::NotFound,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidCredentials(msg)
            | DomainError::Unauthorized(msg)
            | DomainError::UserNotFound(msg)
            | DomainError::HabitNotFound(msg)
            | DomainError::ProjectNotFound(msg)
            | DomainError::PhaseNotFound(msg)
            | DomainError::Conflict(msg)
            | DomainError::Repository(msg)
            | DomainError::ConstraintViolation(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Timeout(msg)
            | DomainError::Validation(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg)
            | DomainError::NotFound(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
