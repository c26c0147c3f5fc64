//! # Session Management
//!
//! Opaque bearer sessions issued at login and registration.
//!
//! ## Invariants
//! - Only the SHA-256 digest of a token is stored
//! - Sessions expire at the stated time
//! - Logout invalidates immediately

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{constant_time_str_eq, generate_token, hash_token};
use super::errors::{AuthError, AuthResult};

/// Session model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// Hashed session token (raw token given to client)
    #[serde(skip_serializing)]
    pub token_hash: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,

    pub revoked: bool,

    /// User agent from the login request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Session manager configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session token lifetime
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
        }
    }
}

/// Session manager handles session creation and validation
pub struct SessionManager<R: SessionRepository> {
    config: SessionConfig,
    repository: R,
}

impl<R: SessionRepository> SessionManager<R> {
    pub fn new(config: SessionConfig, repository: R) -> Self {
        Self { config, repository }
    }

    /// Create a new session for a user
    ///
    /// Returns the raw token (not hashed) to give to the client.
    pub fn create_session(
        &self,
        user_id: Uuid,
        user_agent: Option<String>,
    ) -> AuthResult<(Session, String)> {
        let token = generate_token();
        let token_hash = hash_token(&token);

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + self.config.ttl,
            revoked: false,
            user_agent,
        };

        self.repository.create(&session)?;

        Ok((session, token))
    }

    /// Validate a raw token and return the associated session
    pub fn validate_token(&self, token: &str) -> AuthResult<Session> {
        let token_hash = hash_token(token);

        let session = self
            .repository
            .find_by_token_hash(&token_hash)?
            .ok_or(AuthError::SessionInvalid)?;

        if session.revoked {
            return Err(AuthError::SessionRevoked);
        }

        if session.expires_at < Utc::now() {
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }

    /// Revoke a session (logout)
    pub fn revoke_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.repository.revoke(session_id)
    }

    /// Revoke all sessions for a user
    pub fn revoke_all_user_sessions(&self, user_id: Uuid) -> AuthResult<()> {
        self.repository.revoke_all_for_user(user_id)
    }

    /// Drop expired sessions, returning how many were removed
    pub fn purge_expired(&self) -> AuthResult<usize> {
        self.repository.delete_expired()
    }
}

/// Session repository trait
pub trait SessionRepository: Send + Sync {
    /// Create a new session
    fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find session by token hash
    fn find_by_token_hash(&self, hash: &str) -> AuthResult<Option<Session>>;

    /// Revoke a session
    fn revoke(&self, id: Uuid) -> AuthResult<()>;

    /// Revoke all sessions for a user
    fn revoke_all_for_user(&self, user_id: Uuid) -> AuthResult<()>;

    /// Delete expired sessions (cleanup)
    fn delete_expired(&self) -> AuthResult<usize>;
}

/// In-memory session repository
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: std::sync::RwLock<Vec<Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn create(&self, session: &Session) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        sessions.push(session.clone());
        Ok(())
    }

    fn find_by_token_hash(&self, hash: &str) -> AuthResult<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(sessions
            .iter()
            .find(|s| constant_time_str_eq(&s.token_hash, hash))
            .cloned())
    }

    fn revoke(&self, id: Uuid) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if let Some(session) = sessions.iter_mut().find(|s| s.id == id) {
            session.revoked = true;
            Ok(())
        } else {
            Err(AuthError::SessionInvalid)
        }
    }

    fn revoke_all_for_user(&self, user_id: Uuid) -> AuthResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        for session in sessions.iter_mut().filter(|s| s.user_id == user_id) {
            session.revoked = true;
        }

        Ok(())
    }

    fn delete_expired(&self) -> AuthResult<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        let now = Utc::now();
        let len_before = sessions.len();
        sessions.retain(|s| s.expires_at > now);
        Ok(len_before - sessions.len())
    }
}
