//! # File-backed User Repository
//!
//! Keeps users in memory and rewrites a single JSON document after every
//! mutation. A mutation is staged on a copy of the records; the copy becomes
//! visible only once it has been written to a sibling temp file and renamed
//! into place. A failed write leaves memory and disk on the old records.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::user::{InMemoryUserRepository, User, UserChange, UserRepository};
use crate::auth::{AuthError, AuthResult};

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    version: u32,
    users: Vec<User>,
}

/// User repository persisted to a JSON file
#[derive(Debug)]
pub struct FileUserRepository {
    path: PathBuf,
    inner: InMemoryUserRepository,
    write_lock: Mutex<()>,
}

impl FileUserRepository {
    /// Open the repository, loading existing users if the file exists
    pub fn open(path: impl Into<PathBuf>) -> AuthResult<Self> {
        let path = path.into();

        let users = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
            let document: UserDocument =
                serde_json::from_str(&content).map_err(|e| storage_error(&path, e))?;
            if document.version != FORMAT_VERSION {
                return Err(AuthError::StorageError(format!(
                    "{}: unsupported document version {}",
                    path.display(),
                    document.version
                )));
            }
            document.users
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            inner: InMemoryUserRepository::with_users(users),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a mutation to a staged copy, persist it, then publish it
    fn write<T>(
        &self,
        mutation: impl FnOnce(&InMemoryUserRepository) -> AuthResult<T>,
    ) -> AuthResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        let staged = InMemoryUserRepository::with_users(self.inner.list()?);
        let output = mutation(&staged)?;
        let users = staged.into_users()?;

        self.persist(&users)?;
        self.inner.replace_all(users)?;
        Ok(output)
    }

    fn persist(&self, users: &[User]) -> AuthResult<()> {
        let document = UserDocument {
            version: FORMAT_VERSION,
            users: users.to_vec(),
        };
        let json =
            serde_json::to_vec_pretty(&document).map_err(|e| storage_error(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| storage_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_error(&self.path, e))
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> AuthError {
    AuthError::StorageError(format!("{}: {}", path.display(), err))
}

impl UserRepository for FileUserRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        self.inner.find_by_id(id)
    }

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        self.inner.find_by_email(email)
    }

    fn email_exists(&self, email: &str) -> AuthResult<bool> {
        self.inner.email_exists(email)
    }

    fn list(&self) -> AuthResult<Vec<User>> {
        self.inner.list()
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        self.write(|users| users.create(user))
    }

    fn modify(&self, id: Uuid, change: UserChange<'_>) -> AuthResult<User> {
        self.write(|users| users.modify(id, change))
    }

    fn delete(&self, id: Uuid) -> AuthResult<()> {
        self.write(|users| users.delete(id))
    }
}
