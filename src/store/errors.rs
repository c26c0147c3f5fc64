//! # Store Errors

use thiserror::Error;

use crate::auth::AuthError;

/// Result type for profile store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Profile store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Owning user does not exist
    #[error("User not found")]
    UserNotFound,

    /// User has not completed the questionnaire yet
    #[error("No plans have been generated yet")]
    NoPlans,

    /// History index out of range
    #[error("Plan not found at index {index}")]
    PlanNotFound { index: usize },

    /// Underlying repository failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::UserNotFound => 404,
            StoreError::NoPlans => 404,
            StoreError::PlanNotFound { .. } => 404,
            StoreError::Storage(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<AuthError> for StoreError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound => StoreError::UserNotFound,
            other => StoreError::Storage(other.to_string()),
        }
    }
}
