//! # Profile Store
//!
//! Accumulates questionnaire answers on the user record, runs the plan engine
//! when the questionnaire completes and manages the resulting history.
//!
//! ## Invariants
//! - Every change goes through [`UserRepository::modify`], so it is applied to
//!   the current stored record and cannot overwrite a concurrent change made
//!   here or by the account service.
//! - History is append-only except for admin edits (plan lists only) and
//!   explicit deletion by index.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::history::{PlanEdit, PlanHistoryEntry};
use super::questionnaire::{SavingsInformation, WizardStep};
use crate::auth::{AuthError, User, UserRepository};
use crate::plan::{generate_plan, Profile};

/// A user and their plan history, as listed for administrators
#[derive(Debug, Clone, Serialize)]
pub struct UserPlans {
    pub user_id: Uuid,
    pub email: String,
    pub forename: String,
    pub surname: String,
    pub financial_plans: Vec<PlanHistoryEntry>,
}

impl From<User> for UserPlans {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            forename: user.forename,
            surname: user.surname,
            financial_plans: user.financial_plans,
        }
    }
}

/// Profile and plan-history store over a user repository
pub struct ProfileStore<U: UserRepository + ?Sized> {
    users: Arc<U>,
}

impl<U: UserRepository + ?Sized> ProfileStore<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Record one questionnaire step and return the updated profile
    pub fn save_step<W: WizardStep>(&self, user_id: Uuid, step: W) -> StoreResult<Profile> {
        let profile = self.modify(user_id, |user| {
            step.apply(&mut user.profile);
            Ok(user.profile.clone())
        })?;

        info!(user_id = %user_id, step = W::NAME, "questionnaire step saved");
        Ok(profile)
    }

    /// Record the savings step, generate a plan and append it to the history
    pub fn complete_questionnaire(
        &self,
        user_id: Uuid,
        step: SavingsInformation,
    ) -> StoreResult<PlanHistoryEntry> {
        let entry = self.modify(user_id, |user| {
            step.apply(&mut user.profile);

            let snapshot = user.profile.clone();
            let plan = generate_plan(&snapshot);
            let entry = PlanHistoryEntry::new(snapshot, plan);

            user.financial_plans.push(entry.clone());
            Ok(entry)
        })?;

        info!(
            user_id = %user_id,
            recommendations = entry.plan.recommendations.len(),
            next_steps = entry.plan.next_steps.len(),
            "plan generated"
        );
        Ok(entry)
    }

    /// Current questionnaire answers
    pub fn profile(&self, user_id: Uuid) -> StoreResult<Profile> {
        Ok(self.load(user_id)?.profile)
    }

    /// Full history, oldest first
    pub fn history(&self, user_id: Uuid) -> StoreResult<Vec<PlanHistoryEntry>> {
        Ok(self.load(user_id)?.financial_plans)
    }

    /// Most recent history entry
    pub fn latest_plan(&self, user_id: Uuid) -> StoreResult<PlanHistoryEntry> {
        self.load(user_id)?
            .financial_plans
            .pop()
            .ok_or(StoreError::NoPlans)
    }

    /// History entry by position
    pub fn plan_at(&self, user_id: Uuid, index: usize) -> StoreResult<PlanHistoryEntry> {
        let mut plans = self.load(user_id)?.financial_plans;
        if index < plans.len() {
            Ok(plans.swap_remove(index))
        } else {
            Err(StoreError::PlanNotFound { index })
        }
    }

    /// Every user with their history
    pub fn all_user_plans(&self) -> StoreResult<Vec<UserPlans>> {
        Ok(self
            .users
            .list()?
            .into_iter()
            .map(UserPlans::from)
            .collect())
    }

    /// Rewrite the plan lists of one history entry
    pub fn update_plan(
        &self,
        user_id: Uuid,
        index: usize,
        edit: PlanEdit,
    ) -> StoreResult<PlanHistoryEntry> {
        let entry = self.modify(user_id, |user| {
            let entry = user
                .financial_plans
                .get_mut(index)
                .ok_or(StoreError::PlanNotFound { index })?;
            entry.apply_edit(edit);
            Ok(entry.clone())
        })?;

        info!(user_id = %user_id, index, "plan history entry edited");
        Ok(entry)
    }

    /// Remove one history entry; later entries shift down by one
    pub fn delete_plan(&self, user_id: Uuid, index: usize) -> StoreResult<PlanHistoryEntry> {
        let removed = self.modify(user_id, |user| {
            if index < user.financial_plans.len() {
                Ok(user.financial_plans.remove(index))
            } else {
                Err(StoreError::PlanNotFound { index })
            }
        })?;

        info!(user_id = %user_id, index, "plan history entry deleted");
        Ok(removed)
    }

    fn load(&self, user_id: Uuid) -> StoreResult<User> {
        self.users
            .find_by_id(user_id)?
            .ok_or(StoreError::UserNotFound)
    }

    fn modify<T>(
        &self,
        user_id: Uuid,
        change: impl FnOnce(&mut User) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut outcome = None;

        let saved = self.users.modify(
            user_id,
            Box::new(|user: &mut User| {
                let result = change(user);
                let applied = result.is_ok();
                outcome = Some(result);
                if applied {
                    user.touch();
                    Ok(())
                } else {
                    Err(AuthError::StorageError("change rejected".to_string()))
                }
            }),
        );

        match (saved, outcome) {
            (_, Some(Err(e))) => Err(e),
            (Err(e), _) => Err(e.into()),
            (Ok(_), Some(Ok(value))) => Ok(value),
            (Ok(_), None) => Err(StoreError::Storage("change was not applied".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{InMemoryUserRepository, PasswordPolicy, Role};
    use crate::plan::Savings;
    use crate::store::questionnaire::PersonalInformation;

    fn store_with_user() -> (ProfileStore<InMemoryUserRepository>, Uuid) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = User::new(
            "jo@example.com".to_string(),
            "Jo".to_string(),
            "Bloggs".to_string(),
            Role::User,
            "plan42!",
            &PasswordPolicy::default(),
        )
        .unwrap();
        repo.create(&user).unwrap();
        (ProfileStore::new(repo), user.id)
    }

    fn complete(store: &ProfileStore<InMemoryUserRepository>, user_id: Uuid) -> PlanHistoryEntry {
        store
            .complete_questionnaire(
                user_id,
                SavingsInformation {
                    savings: Some(Savings::Over2000),
                },
            )
            .unwrap()
    }

    #[test]
    fn test_complete_appends_snapshot_and_plan() {
        let (store, user_id) = store_with_user();

        store
            .save_step(
                user_id,
                PersonalInformation {
                    age: Some(52),
                    dependents: Some(0),
                },
            )
            .unwrap();

        let entry = complete(&store, user_id);
        assert_eq!(entry.data_snapshot.age, Some(52));
        assert_eq!(entry.data_snapshot.savings, Some(Savings::Over2000));
        assert_eq!(entry.plan, generate_plan(&entry.data_snapshot));

        let history = store.history(user_id).unwrap();
        assert_eq!(history, vec![entry.clone()]);
        assert_eq!(store.latest_plan(user_id).unwrap(), entry);
    }

    #[test]
    fn test_latest_plan_without_history() {
        let (store, user_id) = store_with_user();
        assert!(matches!(store.latest_plan(user_id), Err(StoreError::NoPlans)));
    }

    #[test]
    fn test_unknown_user() {
        let (store, _) = store_with_user();
        let result = store.save_step(Uuid::new_v4(), PersonalInformation::default());
        assert!(matches!(result, Err(StoreError::UserNotFound)));
    }

    #[test]
    fn test_update_plan_by_index() {
        let (store, user_id) = store_with_user();
        let original = complete(&store, user_id);

        let updated = store
            .update_plan(user_id, 0, PlanEdit::from_text("one\n\ntwo", "step"))
            .unwrap();
        assert_eq!(updated.plan.recommendations, vec!["one", "two"]);
        assert_eq!(updated.plan.next_steps, vec!["step"]);
        assert_eq!(updated.date, original.date);
        assert_eq!(updated.data_snapshot, original.data_snapshot);

        assert!(matches!(
            store.update_plan(user_id, 1, PlanEdit::default()),
            Err(StoreError::PlanNotFound { index: 1 })
        ));
    }

    #[test]
    fn test_delete_plan_shifts_history() {
        let (store, user_id) = store_with_user();
        let first = complete(&store, user_id);
        let second = complete(&store, user_id);

        let removed = store.delete_plan(user_id, 0).unwrap();
        assert_eq!(removed, first);
        assert_eq!(store.plan_at(user_id, 0).unwrap(), second);
        assert!(matches!(
            store.plan_at(user_id, 1),
            Err(StoreError::PlanNotFound { index: 1 })
        ));
    }

    #[test]
    fn test_all_user_plans() {
        let (store, user_id) = store_with_user();
        complete(&store, user_id);

        let listing = store.all_user_plans().unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].user_id, user_id);
        assert_eq!(listing[0].financial_plans.len(), 1);
    }
}
