//! # Auth Service
//!
//! Account operations combining the user repository, password policy and
//! session manager. Used by the HTTP layer for both self-service and admin
//! account management.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::session::{SessionConfig, SessionManager, SessionRepository};
use super::user::{
    CreateUserRequest, LoginRequest, RegisterRequest, Role, UpdateUserRequest, User,
    UserRepository,
};

/// Auth service combining all account components
pub struct AuthService<U: UserRepository + ?Sized, S: SessionRepository> {
    user_repo: Arc<U>,
    session_manager: SessionManager<S>,
    password_policy: PasswordPolicy,
}

impl<U: UserRepository + ?Sized, S: SessionRepository> AuthService<U, S> {
    pub fn new(
        user_repo: Arc<U>,
        session_repo: S,
        session_config: SessionConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            user_repo,
            session_manager: SessionManager::new(session_config, session_repo),
            password_policy,
        }
    }

    /// Shared handle to the user repository
    pub fn users(&self) -> Arc<U> {
        Arc::clone(&self.user_repo)
    }

    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    /// Register a new account and open a session for it
    ///
    /// Self-service accounts always get the `User` role.
    pub fn register(
        &self,
        request: RegisterRequest,
        user_agent: Option<String>,
    ) -> AuthResult<(User, String)> {
        let user = self.create_account(
            request.email,
            request.forename,
            request.surname,
            Role::User,
            &request.password,
        )?;

        let (_, token) = self.session_manager.create_session(user.id, user_agent)?;
        Ok((user, token))
    }

    /// Authenticate a user by email and password
    pub fn login(
        &self,
        request: LoginRequest,
        user_agent: Option<String>,
    ) -> AuthResult<(User, String)> {
        let user = self
            .user_repo
            .find_by_email(request.email.trim())?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            warn!(user_id = %user.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let (_, token) = self.session_manager.create_session(user.id, user_agent)?;
        Ok((user, token))
    }

    /// Logout (invalidate session)
    pub fn logout(&self, token: &str) -> AuthResult<()> {
        let session = self.session_manager.validate_token(token)?;
        self.session_manager.revoke_session(session.id)
    }

    /// Resolve a session token to its user
    pub fn authenticate(&self, token: &str) -> AuthResult<User> {
        let session = self.session_manager.validate_token(token)?;
        self.get_user(session.user_id)
    }

    /// Resolve a session token and require the admin role
    pub fn authenticate_admin(&self, token: &str) -> AuthResult<User> {
        let user = self.authenticate(token)?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Get user by ID
    pub fn get_user(&self, user_id: Uuid) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)?
            .ok_or(AuthError::UserNotFound)
    }

    /// Change password for an authenticated user
    ///
    /// Every existing session of the user is revoked; the returned token is a
    /// fresh session.
    pub fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AuthResult<String> {
        let user = self.get_user(user_id)?;

        if !user.verify_password(current_password)? {
            return Err(AuthError::InvalidCredentials);
        }

        // Hash outside the repository lock; only the hash is written back.
        let new_hash = User::password_hash_for(new_password, &self.password_policy)?;
        let verified_hash = user.password_hash;
        self.user_repo.modify(
            user_id,
            Box::new(|stored: &mut User| {
                if stored.password_hash != verified_hash {
                    return Err(AuthError::InvalidCredentials);
                }
                stored.password_hash = new_hash;
                stored.touch();
                Ok(())
            }),
        )?;

        self.session_manager.revoke_all_user_sessions(user_id)?;
        let (_, token) = self.session_manager.create_session(user_id, None)?;
        Ok(token)
    }

    // ==================
    // Admin operations
    // ==================

    pub fn list_users(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list()
    }

    /// Create an account with an admin-chosen role
    pub fn create_user(&self, request: CreateUserRequest) -> AuthResult<User> {
        self.create_account(
            request.email,
            request.forename,
            request.surname,
            request.role,
            &request.password,
        )
    }

    /// Update account details; profile and plans are left untouched
    pub fn update_user(&self, user_id: Uuid, update: UpdateUserRequest) -> AuthResult<User> {
        self.user_repo.modify(
            user_id,
            Box::new(move |user: &mut User| {
                if let Some(email) = update.email {
                    user.email = email.trim().to_string();
                }
                if let Some(forename) = update.forename {
                    user.forename = forename;
                }
                if let Some(surname) = update.surname {
                    user.surname = surname;
                }
                user.touch();
                Ok(())
            }),
        )
    }

    /// Delete an account and end all of its sessions
    pub fn delete_user(&self, user_id: Uuid) -> AuthResult<()> {
        self.user_repo.delete(user_id)?;
        self.session_manager.revoke_all_user_sessions(user_id)?;
        info!(user_id = %user_id, "user deleted");
        Ok(())
    }

    /// Seed an administrator account if the email is not yet registered
    ///
    /// Returns the created user, or `None` when the email already exists.
    pub fn ensure_admin(
        &self,
        email: &str,
        forename: &str,
        surname: &str,
        password: &str,
    ) -> AuthResult<Option<User>> {
        if self.user_repo.email_exists(email.trim())? {
            return Ok(None);
        }

        self.create_account(
            email.to_string(),
            forename.to_string(),
            surname.to_string(),
            Role::Admin,
            password,
        )
        .map(Some)
    }

    /// Remove expired sessions
    pub fn purge_expired_sessions(&self) -> AuthResult<usize> {
        self.session_manager.purge_expired()
    }

    fn create_account(
        &self,
        email: String,
        forename: String,
        surname: String,
        role: Role,
        password: &str,
    ) -> AuthResult<User> {
        let email = email.trim().to_string();

        if self.user_repo.email_exists(&email)? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user = User::new(email, forename, surname, role, password, &self.password_policy)?;
        self.user_repo.create(&user)?;

        info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }
}
