//! Application layer for the migration portal
//!
//! Orchestrates the domain rules against the store ports: who is signed in,
//! who may create or delete which accounts, and how projects are planned.
//!
//! ## Modules
//!
//! - `services` - Authentication, user management and project services
//! - `validation` - Request types and input validation

pub mod services;
pub mod validation;

// Re-export commonly used types
pub use services::{
    AuthService, AuthorizationResult, EventPublisher, NoOpEventPublisher, ProjectRepositoryPort,
    ProjectService, ServiceContext, ServiceEvent, UserService, UserStorePort,
};
pub use validation::{
    CreateProjectRequest, CreateUserRequest, PasswordResetRequest, SignupRequest, Validatable,
    ValidationResult,
};

use migration_portal_domain::{AuthenticationError, AuthorizationError, ValidationError};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication required or failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Internal error, usually from a store
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::Unauthorized(_) => "UNAUTHORIZED",
            ApplicationError::Forbidden(_) => "FORBIDDEN",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message without the category prefix, as shown to end users.
    pub fn message(&self) -> &str {
        match self {
            ApplicationError::NotFound(m)
            | ApplicationError::Unauthorized(m)
            | ApplicationError::Forbidden(m)
            | ApplicationError::InvalidInput(m)
            | ApplicationError::ValidationFailed(m)
            | ApplicationError::Internal(m) => m,
        }
    }
}

impl From<AuthorizationError> for ApplicationError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::NotSignedIn => ApplicationError::Unauthorized(err.to_string()),
            _ => ApplicationError::Forbidden(err.to_string()),
        }
    }
}

impl From<AuthenticationError> for ApplicationError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::MissingVerificationCode => {
                ApplicationError::ValidationFailed(err.to_string())
            }
            _ => ApplicationError::Unauthorized(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApplicationError {
    fn from(err: ValidationError) -> Self {
        ApplicationError::ValidationFailed(err.to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
