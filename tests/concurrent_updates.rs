//! Concurrent Update Tests
//!
//! Account changes and questionnaire changes share one user record:
//! - A plan generated while a password change is in flight is kept
//! - A password change loses to a password change that landed first
//! - Parallel plan generation and admin edits never drop history entries

use std::sync::{Arc, Mutex};
use std::thread;

use finplan::auth::user::{RegisterRequest, UpdateUserRequest};
use finplan::auth::{
    AuthError, AuthResult, AuthService, InMemorySessionRepository, InMemoryUserRepository,
    PasswordPolicy, SessionConfig, User, UserChange, UserRepository,
};
use finplan::plan::Savings;
use finplan::store::{ProfileStore, SavingsInformation};
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

type Hook = Box<dyn FnOnce() + Send>;

/// Repository that runs a one-shot hook right after a user has been read,
/// so another writer lands between a caller's read and its write.
#[derive(Default)]
struct InterleavingRepository {
    inner: InMemoryUserRepository,
    after_read: Mutex<Option<Hook>>,
}

impl InterleavingRepository {
    fn arm(&self, hook: Hook) {
        *self.after_read.lock().unwrap() = Some(hook);
    }
}

impl UserRepository for InterleavingRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let user = self.inner.find_by_id(id)?;
        let hook = self.after_read.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(user)
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
        self.inner.create(user)
    }

    fn modify(&self, id: Uuid, change: UserChange<'_>) -> AuthResult<User> {
        self.inner.modify(id, change)
    }

    fn delete(&self, id: Uuid) -> AuthResult<()> {
        self.inner.delete(id)
    }
}

struct Fixture {
    repo: Arc<InterleavingRepository>,
    auth: AuthService<InterleavingRepository, InMemorySessionRepository>,
    store: Arc<ProfileStore<InterleavingRepository>>,
    user_id: Uuid,
}

fn setup() -> Fixture {
    let repo = Arc::new(InterleavingRepository::default());
    let auth = AuthService::new(
        Arc::clone(&repo),
        InMemorySessionRepository::new(),
        SessionConfig::default(),
        PasswordPolicy::default(),
    );
    let store = Arc::new(ProfileStore::new(Arc::clone(&repo)));

    let (user, _) = auth
        .register(
            RegisterRequest {
                email: "lee@example.com".to_string(),
                forename: "Lee".to_string(),
                surname: "Park".to_string(),
                password: "s3cret!pw".to_string(),
            },
            None,
        )
        .unwrap();

    Fixture {
        repo,
        auth,
        store,
        user_id: user.id,
    }
}

fn completion_hook(store: &Arc<ProfileStore<InterleavingRepository>>, user_id: Uuid) -> Hook {
    let store = Arc::clone(store);
    Box::new(move || {
        store
            .complete_questionnaire(
                user_id,
                SavingsInformation {
                    savings: Some(Savings::Under500),
                },
            )
            .unwrap();
    })
}

// =============================================================================
// Interleaved Writers
// =============================================================================

#[test]
fn test_plan_survives_password_change() {
    let fx = setup();
    fx.repo.arm(completion_hook(&fx.store, fx.user_id));

    fx.auth
        .change_password(fx.user_id, "s3cret!pw", "n3wer!pw")
        .unwrap();

    assert_eq!(fx.store.history(fx.user_id).unwrap().len(), 1);
    let user = fx.auth.get_user(fx.user_id).unwrap();
    assert!(user.verify_password("n3wer!pw").unwrap());
    assert_eq!(user.profile.savings, Some(Savings::Under500));
}

#[test]
fn test_password_change_rejected_if_password_changed_meanwhile() {
    let fx = setup();
    let repo = Arc::clone(&fx.repo);
    let user_id = fx.user_id;

    fx.repo.arm(Box::new(move || {
        let hash = User::password_hash_for("f1rst!pw", &PasswordPolicy::default()).unwrap();
        repo.modify(
            user_id,
            Box::new(move |user: &mut User| {
                user.password_hash = hash;
                Ok(())
            }),
        )
        .unwrap();
    }));

    let result = fx.auth.change_password(user_id, "s3cret!pw", "s3cond!pw");
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    let user = fx.auth.get_user(user_id).unwrap();
    assert!(user.verify_password("f1rst!pw").unwrap());
    assert!(!user.verify_password("s3cond!pw").unwrap());
}

#[test]
fn test_parallel_writers_keep_every_entry() {
    let fx = setup();
    let auth = Arc::new(fx.auth);
    let completions = 8;

    let mut handles = Vec::new();
    for _ in 0..completions {
        let store = Arc::clone(&fx.store);
        let user_id = fx.user_id;
        handles.push(thread::spawn(move || {
            store
                .complete_questionnaire(
                    user_id,
                    SavingsInformation {
                        savings: Some(Savings::Over2000),
                    },
                )
                .unwrap();
        }));
    }
    for n in 0..completions {
        let auth = Arc::clone(&auth);
        let user_id = fx.user_id;
        handles.push(thread::spawn(move || {
            auth.update_user(
                user_id,
                UpdateUserRequest {
                    surname: Some(format!("Park-{}", n)),
                    ..Default::default()
                },
            )
            .unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(fx.store.history(fx.user_id).unwrap().len(), completions);
}
