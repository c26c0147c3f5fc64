//! # Auth Module
//!
//! User accounts, roles, Argon2id password hashing and bearer sessions.

pub mod crypto;
pub mod errors;
pub mod service;
pub mod session;
pub mod user;

pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use service::AuthService;
pub use session::{InMemorySessionRepository, Session, SessionConfig, SessionManager};
pub use user::{InMemoryUserRepository, Role, User, UserChange, UserRepository};
