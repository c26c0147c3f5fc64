//! # User Management
//!
//! User model and repository. A user record carries the account, the
//! questionnaire profile accumulated so far and the history of generated plans.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, validate_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use crate::plan::Profile;
use crate::store::history::PlanHistoryEntry;

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Email address, used as the login name (unique)
    pub email: String,

    pub forename: String,

    pub surname: String,

    #[serde(default)]
    pub role: Role,

    /// Argon2id password hash (never plaintext)
    pub password_hash: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Questionnaire answers collected so far
    #[serde(default)]
    pub profile: Profile,

    /// Generated plans, oldest first
    #[serde(default)]
    pub financial_plans: Vec<PlanHistoryEntry>,
}

impl User {
    /// Create a new user with the given details and password
    pub fn new(
        email: String,
        forename: String,
        surname: String,
        role: Role,
        password: &str,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        validate_password(password, policy)?;
        let password_hash = hash_password(password)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            email,
            forename,
            surname,
            role,
            password_hash,
            created_at: now,
            updated_at: now,
            profile: Profile::default(),
            financial_plans: Vec::new(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    /// Validate and hash a replacement password without touching any record
    pub fn password_hash_for(new_password: &str, policy: &PasswordPolicy) -> AuthResult<String> {
        validate_password(new_password, policy)?;
        hash_password(new_password)
    }

    /// Update the user's password
    pub fn update_password(&mut self, new_password: &str, policy: &PasswordPolicy) -> AuthResult<()> {
        self.password_hash = Self::password_hash_for(new_password, policy)?;
        self.touch();
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Most recent plan history entry
    pub fn latest_plan(&self) -> Option<&PlanHistoryEntry> {
        self.financial_plans.last()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Self-service registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub forename: String,
    #[serde(default)]
    pub surname: String,
    pub password: String,
}

/// Admin account creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub forename: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub role: Role,
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin update of account details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub forename: Option<String>,
    pub surname: Option<String>,
}

/// In-place change to a stored user, applied by [`UserRepository::modify`]
pub type UserChange<'a> = Box<dyn FnOnce(&mut User) -> AuthResult<()> + 'a>;

/// User repository trait
///
/// Abstracts storage operations for users. Records are only ever changed
/// through [`modify`](UserRepository::modify), which runs the change against
/// the current stored record under the repository's write lock.
pub trait UserRepository: Send + Sync {
    /// Find a user by their ID
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Find a user by their email
    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    fn email_exists(&self, email: &str) -> AuthResult<bool>;

    /// All users in creation order
    fn list(&self) -> AuthResult<Vec<User>>;

    /// Create a new user
    fn create(&self, user: &User) -> AuthResult<()>;

    /// Apply `change` to the stored user atomically and return the saved record
    ///
    /// Nothing is stored when `change` returns an error.
    fn modify(&self, id: Uuid, change: UserChange<'_>) -> AuthResult<User>;

    /// Delete a user
    fn delete(&self, id: Uuid) -> AuthResult<()>;
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with existing records
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: std::sync::RwLock::new(users),
        }
    }

    /// Consume the repository, returning its records
    pub fn into_users(self) -> AuthResult<Vec<User>> {
        self.users.into_inner().map_err(lock_poisoned)
    }

    /// Swap in a new set of records
    pub fn replace_all(&self, users: Vec<User>) -> AuthResult<()> {
        *self.users.write().map_err(lock_poisoned)? = users;
        Ok(())
    }
}

fn lock_poisoned<T>(_: T) -> AuthError {
    AuthError::StorageError("Lock poisoned".to_string())
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self.users.read().map_err(lock_poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().map_err(lock_poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn email_exists(&self, email: &str) -> AuthResult<bool> {
        let users = self.users.read().map_err(lock_poisoned)?;
        Ok(users.iter().any(|u| u.email == email))
    }

    fn list(&self) -> AuthResult<Vec<User>> {
        let users = self.users.read().map_err(lock_poisoned)?;
        Ok(users.clone())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().map_err(lock_poisoned)?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.push(user.clone());
        Ok(())
    }

    fn modify(&self, id: Uuid, change: UserChange<'_>) -> AuthResult<User> {
        let mut users = self.users.write().map_err(lock_poisoned)?;

        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(AuthError::UserNotFound)?;

        let mut user = users[index].clone();
        change(&mut user)?;

        if users.iter().any(|u| u.id != id && u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        users[index] = user.clone();
        Ok(user)
    }

    fn delete(&self, id: Uuid) -> AuthResult<()> {
        let mut users = self.users.write().map_err(lock_poisoned)?;

        let len_before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == len_before {
            Err(AuthError::UserNotFound)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> User {
        User::new(
            email.to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            Role::User,
            "engine1!",
            &PasswordPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_user_creation() {
        let user = new_user("ada@example.com");

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
        assert_ne!(user.password_hash, "engine1!");
        assert_eq!(user.profile, Profile::default());
        assert!(user.latest_plan().is_none());
    }

    #[test]
    fn test_password_verification_and_update() {
        let mut user = new_user("ada@example.com");

        assert!(user.verify_password("engine1!").unwrap());
        assert!(!user.verify_password("engine2!").unwrap());

        user.update_password("engine2!", &PasswordPolicy::default())
            .unwrap();
        assert!(user.verify_password("engine2!").unwrap());
    }

    #[test]
    fn test_weak_password_rejected() {
        let result = User::new(
            "ada@example.com".to_string(),
            String::new(),
            String::new(),
            Role::User,
            "short",
            &PasswordPolicy::default(),
        );
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_in_memory_repository() {
        let repo = InMemoryUserRepository::new();

        let user = new_user("ada@example.com");
        let user_id = user.id;
        repo.create(&user).unwrap();

        assert!(repo.find_by_id(user_id).unwrap().is_some());
        assert!(repo.find_by_email("ada@example.com").unwrap().is_some());
        assert!(repo.email_exists("ada@example.com").unwrap());
        assert!(!repo.email_exists("other@example.com").unwrap());

        let duplicate = new_user("ada@example.com");
        assert!(matches!(
            repo.create(&duplicate),
            Err(AuthError::EmailAlreadyExists)
        ));

        assert_eq!(repo.list().unwrap().len(), 1);

        repo.delete(user_id).unwrap();
        assert!(repo.find_by_id(user_id).unwrap().is_none());
        assert!(matches!(repo.delete(user_id), Err(AuthError::UserNotFound)));
    }

    #[test]
    fn test_modify_rejects_email_taken_by_other_user() {
        let repo = InMemoryUserRepository::new();
        let ada = new_user("ada@example.com");
        let grace = new_user("grace@example.com");
        repo.create(&ada).unwrap();
        repo.create(&grace).unwrap();

        let result = repo.modify(
            grace.id,
            Box::new(|user: &mut User| {
                user.email = "ada@example.com".to_string();
                Ok(())
            }),
        );
        assert!(matches!(result, Err(AuthError::EmailAlreadyExists)));

        let stored = repo.find_by_id(grace.id).unwrap().unwrap();
        assert_eq!(stored.email, "grace@example.com");
    }

    #[test]
    fn test_modify_applies_to_stored_record() {
        let repo = InMemoryUserRepository::new();
        let ada = new_user("ada@example.com");
        repo.create(&ada).unwrap();

        repo.modify(
            ada.id,
            Box::new(|user: &mut User| {
                user.profile.age = Some(36);
                Ok(())
            }),
        )
        .unwrap();

        // Later changes see earlier ones.
        let saved = repo
            .modify(
                ada.id,
                Box::new(|user: &mut User| {
                    user.forename = "Augusta".to_string();
                    Ok(())
                }),
            )
            .unwrap();
        assert_eq!(saved.profile.age, Some(36));
        assert_eq!(saved.forename, "Augusta");
    }

    #[test]
    fn test_failed_modify_stores_nothing() {
        let repo = InMemoryUserRepository::new();
        let ada = new_user("ada@example.com");
        repo.create(&ada).unwrap();

        let result = repo.modify(
            ada.id,
            Box::new(|user: &mut User| {
                user.forename = "Changed".to_string();
                Err(AuthError::Forbidden)
            }),
        );
        assert!(matches!(result, Err(AuthError::Forbidden)));
        assert_eq!(repo.find_by_id(ada.id).unwrap().unwrap().forename, "Ada");

        assert!(matches!(
            repo.modify(Uuid::new_v4(), Box::new(|_: &mut User| Ok(()))),
            Err(AuthError::UserNotFound)
        ));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        let role: Role = serde_json::from_str("\"User\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
