//! # Store Module
//!
//! The profile store: questionnaire accumulation, plan history and the
//! file-backed user repository.

pub mod errors;
pub mod file;
pub mod history;
pub mod questionnaire;
pub mod service;

pub use errors::{StoreError, StoreResult};
pub use file::FileUserRepository;
pub use history::{PlanEdit, PlanEditRequest, PlanHistoryEntry};
pub use questionnaire::{FinancialInformation, PersonalInformation, SavingsInformation, WizardStep};
pub use service::{ProfileStore, UserPlans};
