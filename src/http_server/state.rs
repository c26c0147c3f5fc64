//! Shared application state
//!
//! Services are built once at startup from explicit configuration and handed
//! to every router.

use std::sync::Arc;

use axum::http::HeaderMap;

use super::error::{ApiError, ApiResult};
use crate::auth::{
    AuthService, InMemorySessionRepository, InMemoryUserRepository, PasswordPolicy,
    SessionConfig, User, UserRepository,
};
use crate::store::ProfileStore;

/// Repository type shared by the account and profile services
pub type Users = dyn UserRepository;

pub struct AppState {
    pub auth: AuthService<Users, InMemorySessionRepository>,
    pub store: ProfileStore<Users>,
}

impl AppState {
    pub fn new(users: Arc<Users>, session_config: SessionConfig, policy: PasswordPolicy) -> Self {
        Self {
            store: ProfileStore::new(Arc::clone(&users)),
            auth: AuthService::new(users, InMemorySessionRepository::new(), session_config, policy),
        }
    }

    /// State backed by an in-memory repository with default settings
    pub fn in_memory() -> Self {
        let users: Arc<Users> = Arc::new(InMemoryUserRepository::new());
        Self::new(users, SessionConfig::default(), PasswordPolicy::default())
    }

    /// User owning the bearer token in `headers`
    pub fn current_user(&self, headers: &HeaderMap) -> ApiResult<User> {
        let token = bearer_token(headers).ok_or(ApiError::MissingToken)?;
        Ok(self.auth.authenticate(token)?)
    }

    /// Like [`current_user`](Self::current_user) but requires the admin role
    pub fn current_admin(&self, headers: &HeaderMap) -> ApiResult<User> {
        let token = bearer_token(headers).ok_or(ApiError::MissingToken)?;
        Ok(self.auth.authenticate_admin(token)?)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// `User-Agent` header, if present and readable
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
