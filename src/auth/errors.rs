//! # Auth Errors
//!
//! Error types for the accounts module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and account management errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Unknown email or wrong password (generic on purpose)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Session Errors
    // ==================

    /// Session not found or expired
    #[error("Session expired or invalid")]
    SessionInvalid,

    /// Session has been revoked
    #[error("Session has been revoked")]
    SessionRevoked,

    /// No session token supplied
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Authenticated user lacks the required role
    #[error("Not authorized to access this resource")]
    Forbidden,

    // ==================
    // Account Errors
    // ==================

    /// Account lookup by id failed
    #[error("User not found")]
    UserNotFound,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::SessionInvalid => 401,
            AuthError::SessionRevoked => 401,
            AuthError::AuthenticationRequired => 401,

            // 403 Forbidden
            AuthError::Forbidden => 403,

            // 404 Not Found
            AuthError::UserNotFound => 404,

            // 409 Conflict
            AuthError::EmailAlreadyExists => 409,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
