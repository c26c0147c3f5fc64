//! # Questionnaire Steps
//!
//! The three wizard pages. Each step overwrites exactly its own profile
//! fields; a field posted empty or invalid becomes unset.

use serde::Deserialize;

use crate::plan::{Housing, Profile, Savings};

/// A questionnaire page that writes a subset of the profile
pub trait WizardStep {
    /// Step name used in logs and routes
    const NAME: &'static str;

    fn apply(self, profile: &mut Profile);
}

/// Step 1: personal information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalInformation {
    #[serde(default, deserialize_with = "crate::plan::profile::lenient::count")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "crate::plan::profile::lenient::count")]
    pub dependents: Option<u32>,
}

impl WizardStep for PersonalInformation {
    const NAME: &'static str = "personal-information";

    fn apply(self, profile: &mut Profile) {
        profile.age = self.age;
        profile.dependents = self.dependents;
    }
}

/// Step 2: financial information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinancialInformation {
    #[serde(default, deserialize_with = "crate::plan::profile::lenient::amount")]
    pub income: Option<f64>,
    #[serde(default, deserialize_with = "crate::plan::profile::lenient::text")]
    pub benefits: Option<String>,
    #[serde(default, deserialize_with = "crate::plan::profile::lenient::housing")]
    pub housing: Option<Housing>,
}

impl WizardStep for FinancialInformation {
    const NAME: &'static str = "financial-information";

    fn apply(self, profile: &mut Profile) {
        profile.income = self.income;
        profile.benefits = self.benefits;
        profile.housing = self.housing;
    }
}

/// Step 3: savings; completing it generates a plan
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavingsInformation {
    #[serde(default, deserialize_with = "crate::plan::profile::lenient::savings")]
    pub savings: Option<Savings>,
}

impl WizardStep for SavingsInformation {
    const NAME: &'static str = "savings";

    fn apply(self, profile: &mut Profile) {
        profile.savings = self.savings;
    }
}
