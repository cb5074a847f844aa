use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod transaction;

pub use transaction::{TransactionContext, UnitOfWork};

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

/// Calendar dates are persisted and displayed as ISO 8601 (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    UserNotFound = 2001,
    NotFound = 2002,

    // Business Logic (3xxx)
    DuplicateDailySubmission = 3001,
    ConcurrentModification = 3002,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    PersistenceFailure = 4002,
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
            ErrorCode::DuplicateDailySubmission
            | ErrorCode::UserNotFound
            | ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::ConcurrentModification
            | ErrorCode::PersistenceFailure
            | ErrorCode::TimeoutError => ErrorSeverity::Warning,

            ErrorCode::RepositoryError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::ConcurrentModification
                | ErrorCode::PersistenceFailure
                | ErrorCode::RepositoryError
                | ErrorCode::TimeoutError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Already logged today ({0})")]
    DuplicateDailySubmission(NaiveDate),

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::DuplicateDailySubmission(_) => ErrorCode::DuplicateDailySubmission,
            DomainError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::Persistence(_) => ErrorCode::PersistenceFailure,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::NotFound(_) => ErrorCode::NotFound,
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
