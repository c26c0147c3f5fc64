//! # Cryptographic Utilities
//!
//! Password hashing, password policy and session token generation.
//!
//! Passwords are only ever stored as Argon2id hashes. Session tokens are
//! stored as SHA-256 digests and compared in constant time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

/// Characters accepted as "special" by the default policy
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "!@#$%^&*£";

/// Password requirements configuration
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_number: bool,
    pub require_special: bool,
    /// Characters that satisfy `require_special`
    pub special_characters: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_number: true,
            require_special: true,
            special_characters: DEFAULT_SPECIAL_CHARACTERS.to_string(),
        }
    }
}

impl PasswordPolicy {
    /// Policy with no requirements beyond a minimum length
    pub fn relaxed(min_length: usize) -> Self {
        Self {
            min_length,
            require_number: false,
            require_special: false,
            ..Default::default()
        }
    }

    /// Validate a password against this policy
    pub fn validate(&self, password: &str) -> AuthResult<()> {
        validate_password(password, self)
    }

    /// Human-readable summary used in error messages
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("at least {} characters", self.min_length)];
        if self.require_number {
            parts.push("a number".to_string());
        }
        if self.require_special {
            parts.push(format!("a special character ({})", self.special_characters));
        }
        format!("Password must include {}", parts.join(", "))
    }
}

/// Validate password against policy
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> AuthResult<()> {
    let long_enough = password.chars().count() >= policy.min_length;
    let has_number = !policy.require_number || password.chars().any(|c| c.is_ascii_digit());
    let has_special = !policy.require_special
        || password
            .chars()
            .any(|c| policy.special_characters.contains(c));

    if long_enough && has_number && has_special {
        Ok(())
    } else {
        Err(AuthError::WeakPassword(policy.describe()))
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Verify a password against its hash
///
/// Uses constant-time comparison internally (via argon2 crate).
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a cryptographically secure random token
///
/// Returns a 256-bit (32-byte) random value as base64.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

/// Hash a token for storage using SHA-256
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let result = hasher.finalize();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, result)
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
